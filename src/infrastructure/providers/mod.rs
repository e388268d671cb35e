//! HTTP-backed shortening providers and the registry factory.
//!
//! - [`request_based`] - Shared request/response/error pipeline
//! - [`BitlyShortener`] - Authenticated JSON provider
//! - [`TinyurlShortener`] - Plain-text GET provider
//!
//! [`build_registry`] is the only place that maps a
//! [`ShorteningProviderName`] to a concrete implementation.

mod bitly;
pub mod request_based;
mod tinyurl;

pub use bitly::{BitlyRequestData, BitlyShortener};
pub use request_based::{ProviderResponse, RequestBasedProvider, TransportError};
pub use tinyurl::{TinyurlRequestData, TinyurlShortener};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ProvidersConfig;
use crate::domain::{ProviderRegistry, Shortener, ShorteningProviderName};

/// Builds the provider registry from configuration.
///
/// Providers are registered in `config.enabled` order and share one HTTP
/// client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, a provider's settings
/// are missing or invalid, or the resulting registry would be empty or
/// contain duplicates.
pub fn build_registry(config: &ProvidersConfig) -> Result<ProviderRegistry> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("shorty/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let mut entries: Vec<(ShorteningProviderName, Arc<dyn Shortener>)> = Vec::new();

    for name in &config.enabled {
        let shortener: Arc<dyn Shortener> = match name {
            ShorteningProviderName::Bitly => {
                let bitly = config
                    .bitly
                    .as_ref()
                    .context("bitly provider is enabled but not configured")?;
                Arc::new(
                    BitlyShortener::new(client.clone(), bitly)
                        .context("Invalid bitly provider configuration")?,
                )
            }
            ShorteningProviderName::Tinyurl => Arc::new(
                TinyurlShortener::new(client.clone(), &config.tinyurl)
                    .context("Invalid tinyurl provider configuration")?,
            ),
        };

        tracing::info!(provider = %name, "Registered shortening provider");
        entries.push((*name, shortener));
    }

    Ok(ProviderRegistry::new(entries)?)
}
