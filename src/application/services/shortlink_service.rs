//! Provider selection and ordered fallback dispatch.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ProviderRegistry, RegisteredProvider, ShortenerError, ShorteningProviderName};
use crate::utils::truncate::{LOG_VALUE_MAX_CHARS, truncate_for_log};

/// Service dispatching shortening requests to registered providers.
///
/// Candidates are tried strictly one after another; a provider only starts
/// after the previous one has fully failed. There are no retries of a failed
/// provider.
#[derive(Debug, Clone)]
pub struct ShortLinkService {
    registry: Arc<ProviderRegistry>,
}

impl ShortLinkService {
    /// Creates a new dispatch service over a built registry.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Selects the providers to try for a request.
    ///
    /// A named provider yields just that provider (no fallback). Without a
    /// name, every registered provider is returned in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Generic`] if the named provider is not
    /// registered.
    pub fn candidates(
        &self,
        provider: Option<ShorteningProviderName>,
    ) -> Result<&[RegisteredProvider], ShortenerError> {
        match provider {
            Some(name) => self
                .registry
                .get(name)
                .map(std::slice::from_ref)
                .ok_or_else(|| {
                    ShortenerError::Generic(format!("shortening provider '{name}' is not registered"))
                }),
            None => Ok(self.registry.providers()),
        }
    }

    /// Shortens `long_url` with the named provider, or with all registered
    /// providers in order when `provider` is `None`.
    ///
    /// # Errors
    ///
    /// Returns the error of the last provider tried when every candidate
    /// fails. See [`Self::get_short_link`].
    pub async fn shorten(
        &self,
        long_url: &str,
        provider: Option<ShorteningProviderName>,
    ) -> Result<String, ShortenerError> {
        match provider {
            Some(name) => info!(provider = %name, "Provider requested explicitly"),
            None => info!("Trying to shorten using all providers"),
        }

        let candidates = self.candidates(provider)?;
        let Some((primary, fallbacks)) = candidates.split_first() else {
            return Err(ShortenerError::Generic(
                "no shortening providers registered".to_string(),
            ));
        };

        Self::get_short_link(long_url, primary, fallbacks).await
    }

    /// Tries `primary` and then each of `fallbacks` until one succeeds.
    ///
    /// # Errors
    ///
    /// When every candidate fails, returns the **last** failure observed.
    pub async fn get_short_link(
        long_url: &str,
        primary: &RegisteredProvider,
        fallbacks: &[RegisteredProvider],
    ) -> Result<String, ShortenerError> {
        let logged_url = truncate_for_log(long_url, LOG_VALUE_MAX_CHARS);
        let mut last_error = None;

        for candidate in std::iter::once(primary).chain(fallbacks) {
            info!(provider = %candidate.name, "Trying to shorten");
            debug!(provider = %candidate.name, long_url = %logged_url, "Long link");

            match candidate.shortener.shorten(long_url).await {
                Ok(short_link) => {
                    info!(provider = %candidate.name, "The link has been successfully shortened");
                    debug!(
                        provider = %candidate.name,
                        long_url = %logged_url,
                        short_link = %short_link,
                        "Shortened"
                    );
                    return Ok(short_link);
                }
                Err(e) => {
                    warn!(
                        provider = %candidate.name,
                        kind = e.kind(),
                        error = %e,
                        long_url = %logged_url,
                        "An error occurred during shortening"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ShortenerError::Generic("no shortening provider was tried".to_string())
        }))
    }
}
