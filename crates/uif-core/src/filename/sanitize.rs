//! Filename sanitization for fetched images.

/// Base name used when nothing usable survives sanitization.
pub const FALLBACK_BASENAME: &str = "ubuntu_image";

/// Extension appended when the name lacks a recognized image extension.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Recognized image extensions, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"];

/// Turns an arbitrary candidate into a safe, non-empty image filename.
///
/// - Drops everything from the first `?`
/// - Replaces each character other than ASCII letters, digits and `.` with `_`
/// - Uses [`FALLBACK_BASENAME`] when the result is empty or `.`
/// - Appends [`DEFAULT_EXTENSION`] unless the name already ends with one of
///   [`ALLOWED_EXTENSIONS`]; an unrecognized extension is kept, so `a.tiff`
///   becomes `a.tiff.jpg`
pub fn sanitize_filename(candidate: &str) -> String {
    let without_query = candidate.split('?').next().unwrap_or_default();

    let mut cleaned: String = without_query
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." {
        cleaned = FALLBACK_BASENAME.to_string();
    }

    if !has_allowed_extension(&cleaned) {
        cleaned.push_str(DEFAULT_EXTENSION);
    }
    cleaned
}

fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
