//! TinyURL-like provider: unauthenticated `GET`, plain-text short link body.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use super::request_based::{
    ProviderResponse, RequestBasedProvider, TransportError, shorten_with_request,
};
use crate::config::TinyurlConfig;
use crate::domain::{Shortener, ShortenerError, ShorteningProviderName};
use crate::utils::url::{UrlError, join_endpoint, parse_http_url};

const SHORTEN_ENDPOINT: &str = "api-create.php";

/// Query parameters of the `api-create.php` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TinyurlRequestData {
    pub url: String,
}

/// Shortener backed by the TinyURL `api-create.php` endpoint.
#[derive(Debug)]
pub struct TinyurlShortener {
    client: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl TinyurlShortener {
    /// Creates a TinyURL shortener sharing `client`'s connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] if the configured base URL is invalid.
    pub fn new(client: reqwest::Client, config: &TinyurlConfig) -> Result<Self, UrlError> {
        Ok(Self {
            client,
            endpoint: join_endpoint(&config.base_url, SHORTEN_ENDPOINT)?,
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RequestBasedProvider for TinyurlShortener {
    type RequestData = TinyurlRequestData;

    fn provider_name(&self) -> ShorteningProviderName {
        ShorteningProviderName::Tinyurl
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn prepare_request_data(&self, long_url: &str) -> TinyurlRequestData {
        TinyurlRequestData {
            url: long_url.to_string(),
        }
    }

    async fn make_shorten_request(
        &self,
        request_data: &TinyurlRequestData,
    ) -> Result<ProviderResponse, TransportError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(request_data)
            .timeout(self.timeout)
            .send()
            .await?;

        ProviderResponse::from_reqwest(response).await
    }

    /// The whole body is the short link.
    fn short_link_from_response(
        &self,
        response: &ProviderResponse,
    ) -> Result<String, ShortenerError> {
        let link = response.body.trim();

        parse_http_url(link).map_err(|e| {
            ShortenerError::InvalidResponse(format!("tinyurl returned an invalid link: {e}"))
        })?;

        Ok(link.to_string())
    }
}

#[async_trait]
impl Shortener for TinyurlShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenerError> {
        shorten_with_request(self, long_url).await
    }
}
