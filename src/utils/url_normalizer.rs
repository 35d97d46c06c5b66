//! Cleanup of URLs typed by the user before they are submitted for shortening.

use url::Url;

/// Errors that can occur while preparing a URL for submission.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlInputError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Prepares raw user input for the create endpoint.
///
/// # Rules
///
/// 1. Surrounding whitespace is removed
/// 2. Input without a scheme gets `http://` prepended, the way the backend
///    would do it anyway
/// 3. Only HTTP and HTTPS are accepted
///
/// The returned string is otherwise left as typed: the backend deduplicates on
/// the exact original URL, so no canonicalization happens here.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(prepare_url("example.com/a").unwrap(), "http://example.com/a");
/// assert_eq!(prepare_url("https://example.com").unwrap(), "https://example.com");
/// ```
pub fn prepare_url(input: &str) -> Result<String, UrlInputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlInputError::Empty);
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlInputError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlInputError::UnsupportedProtocol),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlInputError::InvalidFormat("missing host".to_string()));
    }

    Ok(candidate)
}
