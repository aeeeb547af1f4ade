//! Response validation before content is persisted.

use crate::error::ValidationError;
use crate::http::ResponseHead;

/// Default ceiling for a declared `Content-Length` (10 MiB).
pub const MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

const IMAGE_PREFIX: &str = "image/";

/// Confirms the response declares an image no larger than `max_content_length`.
///
/// An absent `Content-Type` fails like any non-image type. An absent
/// `Content-Length` passes; only a declared size is checked here.
pub fn validate_head(head: &ResponseHead, max_content_length: u64) -> Result<(), ValidationError> {
    let content_type = head.content_type.as_deref().unwrap_or("");
    if !content_type.starts_with(IMAGE_PREFIX) {
        return Err(ValidationError::InvalidContentType {
            content_type: content_type.to_string(),
        });
    }

    if let Some(declared) = head.content_length {
        if declared > max_content_length {
            return Err(ValidationError::ContentTooLarge {
                declared,
                limit: max_content_length,
            });
        }
    }

    Ok(())
}
