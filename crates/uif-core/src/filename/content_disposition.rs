//! `filename=` extraction from a Content-Disposition header.

/// Extracts the `filename=` parameter from a raw Content-Disposition value.
///
/// Surrounding double quotes are stripped and backslash-escaped quotes inside
/// them are unescaped. A bare `filename=` with no value counts as absent, but
/// a quoted empty value (`filename=""`) is returned as `Some("")`, which the
/// sanitizer later turns into the fallback name. `filename*=` is not
/// consulted; its non-ASCII content would be replaced by the sanitizer anyway.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    for param in header_value.trim().split(';') {
        let Some((name, value)) = param.trim().split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let unquoted = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            unescape_quoted(&value[1..value.len() - 1])
        } else {
            value.trim_matches('"').to_string()
        };
        return Some(unquoted);
    }
    None
}

fn unescape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
