//! Bitly-like provider: authenticated JSON `POST`, short link in a `link` field.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::request_based::{
    ProviderResponse, RequestBasedProvider, TransportError, shorten_with_request,
};
use crate::config::BitlyConfig;
use crate::domain::{Shortener, ShortenerError, ShorteningProviderName};
use crate::utils::url::{UrlError, join_endpoint, parse_http_url};

const SHORTEN_ENDPOINT: &str = "shorten";

/// JSON body sent to the shorten endpoint.
///
/// Optional qualifiers are omitted from the body when not configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitlyRequestData {
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BitlyShortenResponse {
    link: String,
}

/// Shortener backed by the Bitly v4 `shorten` API.
pub struct BitlyShortener {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    domain: Option<String>,
    group_guid: Option<String>,
    timeout: Duration,
}

impl BitlyShortener {
    /// Creates a Bitly shortener sharing `client`'s connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError`] if the configured base URL cannot be joined with
    /// the shorten endpoint.
    pub fn new(client: reqwest::Client, config: &BitlyConfig) -> Result<Self, UrlError> {
        Ok(Self {
            client,
            endpoint: join_endpoint(&config.base_url, SHORTEN_ENDPOINT)?,
            api_key: config.api_key.clone(),
            domain: config.domain.clone(),
            group_guid: config.group_guid.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for BitlyShortener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitlyShortener")
            .field("endpoint", &self.endpoint.as_str())
            .field("domain", &self.domain)
            .field("group_guid", &self.group_guid)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RequestBasedProvider for BitlyShortener {
    type RequestData = BitlyRequestData;

    fn provider_name(&self) -> ShorteningProviderName {
        ShorteningProviderName::Bitly
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn prepare_request_data(&self, long_url: &str) -> BitlyRequestData {
        BitlyRequestData {
            long_url: long_url.to_string(),
            group_guid: self.group_guid.clone(),
            domain: self.domain.clone(),
        }
    }

    async fn make_shorten_request(
        &self,
        request_data: &BitlyRequestData,
    ) -> Result<ProviderResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request_data)
            .timeout(self.timeout)
            .send()
            .await?;

        ProviderResponse::from_reqwest(response).await
    }

    fn short_link_from_response(
        &self,
        response: &ProviderResponse,
    ) -> Result<String, ShortenerError> {
        let body: BitlyShortenResponse = serde_json::from_str(&response.body).map_err(|e| {
            ShortenerError::InvalidResponse(format!("unexpected bitly response body: {e}"))
        })?;

        parse_http_url(&body.link).map_err(|e| {
            ShortenerError::InvalidResponse(format!("bitly returned an invalid link: {e}"))
        })?;

        Ok(body.link)
    }
}

#[async_trait]
impl Shortener for BitlyShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenerError> {
        shorten_with_request(self, long_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LONG_URL: &str = "https://long.com";
    const SHORT_URL: &str = "https://bit.ly/3abcDEF";

    fn config(base_url: &str) -> BitlyConfig {
        BitlyConfig {
            base_url: base_url.to_string(),
            api_key: "api_key".to_string(),
            domain: None,
            group_guid: None,
            timeout: Duration::from_secs(1),
        }
    }

    fn shortener(config: BitlyConfig) -> BitlyShortener {
        BitlyShortener::new(reqwest::Client::new(), &config).unwrap()
    }

    #[test]
    fn test_endpoint_joined_under_base_path() {
        let s = shortener(config("https://api-ssl.bitly.com/v4"));
        assert_eq!(s.endpoint().as_str(), "https://api-ssl.bitly.com/v4/shorten");
    }

    #[test]
    fn test_prepare_request_data_without_qualifiers() {
        let s = shortener(config("https://bit.ly"));

        let data = s.prepare_request_data(LONG_URL);

        assert_eq!(serde_json::to_value(&data).unwrap(), json!({ "long_url": LONG_URL }));
    }

    #[test]
    fn test_prepare_request_data_with_qualifiers() {
        let mut cfg = config("https://bit.ly");
        cfg.domain = Some("some_domain".to_string());
        cfg.group_guid = Some("some_guid".to_string());
        let s = shortener(cfg);

        let data = s.prepare_request_data(LONG_URL);

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "long_url": LONG_URL, "domain": "some_domain", "group_guid": "some_guid" })
        );
    }

    #[test]
    fn test_short_link_from_response() {
        let s = shortener(config("https://bit.ly"));
        let response = ProviderResponse::new(
            StatusCode::OK,
            json!({ "link": SHORT_URL, "id": "bit.ly/3abcDEF" }).to_string(),
        );

        assert_eq!(s.short_link_from_response(&response).unwrap(), SHORT_URL);
    }

    #[test]
    fn test_short_link_from_response_without_link() {
        let s = shortener(config("https://bit.ly"));
        let response = ProviderResponse::new(StatusCode::OK, json!({ "id": "x" }).to_string());

        assert!(matches!(
            s.short_link_from_response(&response),
            Err(ShortenerError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_short_link_from_response_with_relative_link() {
        let s = shortener(config("https://bit.ly"));
        let response = ProviderResponse::new(StatusCode::OK, json!({ "link": "3abc" }).to_string());

        assert!(matches!(
            s.short_link_from_response(&response),
            Err(ShortenerError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_shorten_sends_authenticated_json_post() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v4/shorten"))
            .and(header("authorization", "Bearer api_key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "long_url": LONG_URL, "group_guid": "some_guid" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "link": SHORT_URL })))
            .expect(1)
            .mount(&server)
            .await;

        let mut cfg = config(&format!("{}/v4", server.uri()));
        cfg.group_guid = Some("some_guid".to_string());
        let s = shortener(cfg);

        assert_eq!(s.shorten(LONG_URL).await.unwrap(), SHORT_URL);
    }

    #[tokio::test]
    async fn test_shorten_accepts_created_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/shorten"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "link": SHORT_URL })))
            .mount(&server)
            .await;

        let s = shortener(config(&server.uri()));

        assert_eq!(s.shorten(LONG_URL).await.unwrap(), SHORT_URL);
    }

    #[tokio::test]
    async fn test_shorten_error_statuses_are_invalid_response() {
        for status in [400, 401, 403, 500] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/shorten"))
                .respond_with(
                    ResponseTemplate::new(status).set_body_json(json!({ "link": SHORT_URL })),
                )
                .mount(&server)
                .await;

            let s = shortener(config(&server.uri()));
            let result = s.shorten(LONG_URL).await;

            assert!(
                matches!(result, Err(ShortenerError::InvalidResponse(_))),
                "status {status}: {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_shorten_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let s = shortener(config(&server.uri()));

        assert!(matches!(
            s.shorten(LONG_URL).await,
            Err(ShortenerError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_shorten_slow_upstream_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "link": SHORT_URL }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut cfg = config(&server.uri());
        cfg.timeout = Duration::from_millis(50);
        let s = shortener(cfg);

        assert!(matches!(
            s.shorten(LONG_URL).await,
            Err(ShortenerError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_shorten_unreachable_upstream_is_request_error() {
        let s = shortener(config("http://127.0.0.1:1"));

        assert!(matches!(
            s.shorten(LONG_URL).await,
            Err(ShortenerError::Request(_))
        ));
    }
}
