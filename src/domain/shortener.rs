//! Shortening provider contract and its error taxonomy.

use async_trait::async_trait;

/// Classified failure of a shortening attempt.
///
/// The variants mirror a small hierarchy: [`ShortenerError::Request`],
/// [`ShortenerError::Timeout`] and [`ShortenerError::InvalidResponse`] all
/// belong to the request-failure family (see [`ShortenerError::is_request_failure`]),
/// while [`ShortenerError::Generic`] covers everything else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenerError {
    #[error("Shortening failed: {0}")]
    Generic(String),

    #[error("Shortening provider request failed: {0}")]
    Request(String),

    #[error("Shortening provider timed out: {0}")]
    Timeout(String),

    #[error("Invalid shortening provider response: {0}")]
    InvalidResponse(String),
}

impl ShortenerError {
    /// Whether the error belongs to the request-failure family.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Timeout(_) | Self::InvalidResponse(_)
        )
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Generic(_) => "generic",
            Self::Request(_) => "request",
            Self::Timeout(_) => "timeout",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// A service able to turn a long URL into a short one.
///
/// Implementations must either return a well-formed short URL or fail with a
/// [`ShortenerError`], never with an unclassified error, so callers can make
/// fallback decisions uniformly. Instances are shared read-only across
/// concurrent requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::providers::BitlyShortener`]
/// - [`crate::infrastructure::providers::TinyurlShortener`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Shortener: Send + Sync {
    /// Shortens `long_url`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ShortenerError`] describing why the provider
    /// could not produce a short link.
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_family() {
        assert!(ShortenerError::Request("x".into()).is_request_failure());
        assert!(ShortenerError::Timeout("x".into()).is_request_failure());
        assert!(ShortenerError::InvalidResponse("x".into()).is_request_failure());
        assert!(!ShortenerError::Generic("x".into()).is_request_failure());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ShortenerError::Timeout("bitly after 1s".into());
        assert_eq!(err.to_string(), "Shortening provider timed out: bitly after 1s");
    }
}
