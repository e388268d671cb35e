//! URL parsing and joining helpers.
//!
//! Long URLs received from clients, short links returned by providers and
//! provider base URLs from configuration all go through [`parse_http_url`].

use url::Url;

/// Errors that can occur while checking or joining URLs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacter,
}

/// Parses an absolute HTTP(S) URL with a host.
///
/// # Errors
///
/// Returns [`UrlError::InvalidFormat`] for malformed or relative URLs,
/// [`UrlError::UnsupportedProtocol`] for non-HTTP(S) schemes such as
/// `htts:`, `javascript:` or `file:`, and [`UrlError::MissingHost`] when the
/// URL has no host. Whitespace and control characters anywhere in the input
/// are rejected with [`UrlError::IllegalCharacter`] rather than stripped.
///
/// # Examples
///
/// ```ignore
/// assert!(parse_http_url("https://test.com").is_ok());
/// assert!(parse_http_url("testcom").is_err());
/// assert!(parse_http_url("htts://test.com").is_err());
/// ```
pub fn parse_http_url(input: &str) -> Result<Url, UrlError> {
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlError::IllegalCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}

/// Joins a relative endpoint onto a provider base URL.
///
/// The base is treated as a directory: a trailing slash is appended when
/// missing, so `https://api-ssl.bitly.com/v4` + `shorten` yields
/// `https://api-ssl.bitly.com/v4/shorten` instead of replacing `v4`.
///
/// # Errors
///
/// Returns [`UrlError::InvalidFormat`] if the base cannot be parsed or the
/// join fails.
pub fn join_endpoint(base: &str, endpoint: &str) -> Result<Url, UrlError> {
    let mut base = base.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .and_then(|b| b.join(endpoint))
        .map_err(|e| UrlError::InvalidFormat(e.to_string()))
}
