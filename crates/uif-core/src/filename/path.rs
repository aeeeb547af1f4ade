//! Filename candidate from the URL path.

/// Returns the text after the final `/` of the URL path.
///
/// The segment is returned still percent-encoded, and may be empty when the
/// path ends with `/`. Returns `None` only if the URL cannot be parsed.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    let segment = path.rsplit('/').next().unwrap_or(path);
    Some(segment.to_string())
}
