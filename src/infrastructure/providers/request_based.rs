//! Shared request → response → error pipeline for HTTP-backed providers.
//!
//! A concrete provider implements [`RequestBasedProvider`] (how to build the
//! payload, how to call the upstream, how to read the short link) and forwards
//! its [`crate::domain::Shortener::shorten`] to [`shorten_with_request`], which
//! owns logging and error classification.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::domain::{ShortenerError, ShorteningProviderName};
use crate::utils::truncate::{LOG_VALUE_MAX_CHARS, truncate_for_log};

/// Raw upstream response captured by [`RequestBasedProvider::make_shorten_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Reads status and full body from a `reqwest` response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the body cannot be read (including a
    /// timeout while streaming it).
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    /// Whether the status is in the accepted `[200, 400)` range.
    pub fn is_accepted_status(&self) -> bool {
        (200..400).contains(&self.status.as_u16())
    }
}

/// Failure of the outbound call itself, before any status is inspected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Other(e.to_string())
        }
    }
}

/// Provider-specific steps of an HTTP-backed shortening provider.
#[async_trait]
pub trait RequestBasedProvider: Send + Sync {
    /// Payload built from the long URL (body fields, query parameters, ...).
    type RequestData: Debug + Send + Sync;

    fn provider_name(&self) -> ShorteningProviderName;

    /// Upper bound for a single outbound call.
    fn timeout(&self) -> Duration;

    /// Builds the provider payload for `long_url`. Performs no I/O.
    fn prepare_request_data(&self, long_url: &str) -> Self::RequestData;

    /// Performs exactly one outbound HTTP call.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the upstream could not be reached or did
    /// not answer in time. Non-success statuses are not errors at this level.
    async fn make_shorten_request(
        &self,
        request_data: &Self::RequestData,
    ) -> Result<ProviderResponse, TransportError>;

    /// Extracts the short link from a response with an accepted status.
    ///
    /// # Errors
    ///
    /// Any error returned here is reported as
    /// [`ShortenerError::InvalidResponse`].
    fn short_link_from_response(&self, response: &ProviderResponse)
    -> Result<String, ShortenerError>;
}

/// Shortens `long_url` through `provider`.
///
/// # Errors
///
/// - [`ShortenerError::Timeout`] if the call timed out, either inside the
///   HTTP client or past [`RequestBasedProvider::timeout`]
/// - [`ShortenerError::Request`] for any other transport failure
/// - [`ShortenerError::InvalidResponse`] for statuses outside `[200, 400)` or
///   when the short link cannot be extracted
pub async fn shorten_with_request<P>(provider: &P, long_url: &str) -> Result<String, ShortenerError>
where
    P: RequestBasedProvider + ?Sized,
{
    let name = provider.provider_name();
    let timeout = provider.timeout();

    let data = provider.prepare_request_data(long_url);
    debug!(provider = %name, request_data = ?data, "Prepared request data");

    let response = match tokio::time::timeout(timeout, provider.make_shorten_request(&data)).await
    {
        Ok(Ok(response)) => response,
        Ok(Err(TransportError::Timeout)) | Err(_) => {
            warn!(provider = %name, ?timeout, "Provider request timed out");
            return Err(ShortenerError::Timeout(format!(
                "{name} did not respond within {timeout:?}"
            )));
        }
        Ok(Err(TransportError::Other(reason))) => {
            warn!(provider = %name, %reason, "Provider request failed");
            return Err(ShortenerError::Request(format!("{name}: {reason}")));
        }
    };

    info!(provider = %name, "Received response from provider");
    debug!(
        provider = %name,
        status = response.status.as_u16(),
        content = %truncate_for_log(&response.body, LOG_VALUE_MAX_CHARS),
        "Provider response"
    );

    if !response.is_accepted_status() {
        warn!(
            provider = %name,
            status = response.status.as_u16(),
            content = %truncate_for_log(&response.body, LOG_VALUE_MAX_CHARS),
            "Provider answered with non-success status"
        );
        return Err(ShortenerError::InvalidResponse(format!(
            "{name} answered with status {}",
            response.status
        )));
    }

    provider
        .short_link_from_response(&response)
        .map_err(|e| match e {
            ShortenerError::InvalidResponse(_) => e,
            other => ShortenerError::InvalidResponse(format!("{name}: {other}")),
        })
        .inspect_err(|e| warn!(provider = %name, error = %e, "Could not extract short link"))
}
