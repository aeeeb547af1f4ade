//! Filename derivation for fetched images.
//!
//! The base name comes from the `Content-Disposition` header when it carries a
//! `filename=` parameter, otherwise from the last URL path segment. Either way
//! it is sanitized to ASCII letters, digits, dots and underscores and forced to
//! carry an image extension.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use path::last_path_segment;
pub use sanitize::{sanitize_filename, ALLOWED_EXTENSIONS, DEFAULT_EXTENSION, FALLBACK_BASENAME};

use crate::http::ResponseHead;

/// Derives the base filename (before uniqueness suffixing) for a download.
///
/// # Examples
///
/// - `https://example.com/img/cat.png`, no disposition → `"cat.png"`
/// - `https://example.com/get?id=3`, `attachment; filename="dog.gif"` → `"dog.gif"`
/// - `https://example.com/`, no disposition → `"ubuntu_image.jpg"`
pub fn resolve_filename(url: &str, head: &ResponseHead) -> String {
    let candidate = head
        .content_disposition
        .as_deref()
        .and_then(parse_content_disposition_filename)
        .or_else(|| last_path_segment(url))
        .unwrap_or_default();

    sanitize_filename(&candidate)
}
