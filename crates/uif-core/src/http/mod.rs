//! Blocking HTTP GET for a single image.
//!
//! Uses the curl crate (libcurl easy interface). The response head is handed
//! to a caller-supplied check as soon as the final header block is complete,
//! before any body byte is accepted; a rejected head aborts the transfer.

mod parse;

pub use parse::parse_head;

use crate::config::FetcherConfig;
use crate::error::{FetchError, ValidationError};
use std::cell::RefCell;
use std::str;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;

/// Metadata of the final (post-redirect) response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Status code from the status line; 0 if none was seen.
    pub status: u32,
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    /// Declared size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
    /// `Content-Disposition` value if present (filename hint).
    pub content_disposition: Option<String>,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A fully received response.
#[derive(Debug)]
pub struct Response {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

/// Per-request transfer settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Connect timeout, and the longest the transfer may stall without data.
    pub timeout: Duration,
    /// Abort once more than this many body bytes have arrived.
    pub max_body_bytes: Option<u64>,
}

impl HttpOptions {
    pub fn from_config(cfg: &FetcherConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_body_bytes: cfg
                .enforce_received_limit
                .then_some(cfg.max_content_length),
        }
    }
}

/// Performs a GET and reads the whole body into memory.
///
/// The URL must be absolute with an `http` or `https` scheme; libcurl would
/// otherwise guess one. Follows redirects. A non-2xx final status becomes `FetchError::Connection`
/// without calling `check_head`; otherwise `check_head` runs exactly once, and
/// its error is returned as-is.
pub fn get<F>(url: &str, opts: &HttpOptions, mut check_head: F) -> Result<Response, FetchError>
where
    F: FnMut(&ResponseHead) -> Result<(), FetchError>,
{
    check_url(url)?;
    let conn = |e: curl::Error| FetchError::connection(url, e.to_string());

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(conn)?;
    easy.follow_location(true).map_err(conn)?;
    easy.max_redirections(MAX_REDIRECTS).map_err(conn)?;
    easy.useragent(&opts.user_agent).map_err(conn)?;
    easy.connect_timeout(opts.timeout).map_err(conn)?;
    easy.low_speed_limit(1).map_err(conn)?;
    easy.low_speed_time(opts.timeout).map_err(conn)?;

    // Header lines of the most recent response only; each status line starts a new block.
    let lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let mut head: Option<ResponseHead> = None;
    let mut body: Vec<u8> = Vec::new();
    let mut aborted: Option<FetchError> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    let mut lines = lines.borrow_mut();
                    if line.starts_with("HTTP/") {
                        lines.clear();
                    }
                    lines.push(line.to_string());
                }
                true
            })
            .map_err(conn)?;
        transfer
            .write_function(|data| {
                if head.is_none() {
                    let parsed = parse_head(&lines.borrow());
                    if let Err(e) = admit(url, &parsed, &mut check_head) {
                        aborted = Some(e);
                        return Ok(0);
                    }
                    head = Some(parsed);
                }
                if let Some(limit) = opts.max_body_bytes {
                    if (body.len() + data.len()) as u64 > limit {
                        tracing::warn!(url, limit, "body exceeded limit, aborting transfer");
                        aborted = Some(ValidationError::BodyTooLarge { limit }.into());
                        return Ok(0);
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(conn)?;
        transfer.perform()
    };

    if let Some(e) = aborted {
        return Err(e);
    }
    performed.map_err(conn)?;

    // Empty bodies never reach the write callback.
    let head = match head {
        Some(h) => h,
        None => {
            let mut parsed = parse_head(&lines.into_inner());
            if parsed.status == 0 {
                parsed.status = easy.response_code().map_err(conn)?;
            }
            admit(url, &parsed, &mut check_head)?;
            parsed
        }
    };

    tracing::debug!(url, status = head.status, bytes = body.len(), "GET complete");
    Ok(Response { head, body })
}

fn admit<F>(url: &str, head: &ResponseHead, check_head: &mut F) -> Result<(), FetchError>
where
    F: FnMut(&ResponseHead) -> Result<(), FetchError>,
{
    if !head.is_success() {
        return Err(FetchError::connection(
            url,
            format!("HTTP {}", head.status),
        ));
    }
    check_head(head)
}

fn check_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| FetchError::connection(url, format!("Invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::connection(
            url,
            format!("Unsupported URL scheme '{other}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(url: &str) -> String {
        match check_url(url) {
            Err(FetchError::Connection { message, .. }) => message,
            other => panic!("expected Connection error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(check_url("http://127.0.0.1:8080/cat.png").is_ok());
        assert!(check_url("https://example.com/a.jpg?x=1").is_ok());
    }

    #[test]
    fn rejects_url_without_scheme() {
        assert!(message("127.0.0.1:8080/cat.png").starts_with("Invalid URL"));
        assert!(message("example.com/cat.png").starts_with("Invalid URL"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(message("ftp://example.com/cat.png"), "Unsupported URL scheme 'ftp'");
        assert_eq!(message("file:///etc/passwd"), "Unsupported URL scheme 'file'");
    }
}
