//! End-to-end dispatch through the real providers against stubbed upstreams.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shorty::api::routes::routes;
use shorty::config::{BitlyConfig, ProvidersConfig, TinyurlConfig};
use shorty::domain::ShorteningProviderName;
use shorty::infrastructure::providers::build_registry;
use shorty::state::AppState;

const LONG_URL: &str = "https://example.com/articles/42";

fn providers_config(bitly_url: &str, tinyurl_url: &str, timeout: Duration) -> ProvidersConfig {
    ProvidersConfig {
        enabled: vec![ShorteningProviderName::Bitly, ShorteningProviderName::Tinyurl],
        bitly: Some(BitlyConfig {
            base_url: format!("{bitly_url}/v4"),
            api_key: "test-key".to_string(),
            domain: None,
            group_guid: None,
            timeout,
        }),
        tinyurl: TinyurlConfig {
            base_url: tinyurl_url.to_string(),
            timeout,
        },
    }
}

fn server_for(config: &ProvidersConfig) -> TestServer {
    let registry = build_registry(config).unwrap();
    let state = AppState::new(Arc::new(registry), false);
    TestServer::new(routes().with_state(state)).unwrap()
}

#[tokio::test]
async fn test_bitly_failure_falls_back_to_tinyurl() {
    let bitly = MockServer::start().await;
    let tinyurl = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&bitly)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .and(query_param("url", LONG_URL))
        .respond_with(ResponseTemplate::new(200).set_body_string("https://tinyurl.com/abc123"))
        .expect(1)
        .mount(&tinyurl)
        .await;

    let server = server_for(&providers_config(
        &bitly.uri(),
        &tinyurl.uri(),
        Duration::from_secs(2),
    ));

    let response = server
        .post("/shortlinks")
        .json(&json!({ "url": LONG_URL }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "url": LONG_URL, "link": "https://tinyurl.com/abc123" })
    );
}

#[tokio::test]
async fn test_named_bitly_success() {
    let bitly = MockServer::start().await;
    let tinyurl = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "link": "https://bit.ly/3xyz" })),
        )
        .expect(1)
        .mount(&bitly)
        .await;

    let server = server_for(&providers_config(
        &bitly.uri(),
        &tinyurl.uri(),
        Duration::from_secs(2),
    ));

    let response = server
        .post("/shortlinks")
        .json(&json!({ "url": LONG_URL, "provider": "bitly" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["link"],
        "https://bit.ly/3xyz"
    );
}

#[tokio::test]
async fn test_named_slow_provider_is_gateway_timeout() {
    let bitly = MockServer::start().await;
    let tinyurl = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("https://tinyurl.com/late")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&tinyurl)
        .await;

    let server = server_for(&providers_config(
        &bitly.uri(),
        &tinyurl.uri(),
        Duration::from_millis(100),
    ));

    let response = server
        .post("/shortlinks")
        .json(&json!({ "url": LONG_URL, "provider": "tinyurl" }))
        .await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_all_providers_invalid_is_bad_gateway() {
    let bitly = MockServer::start().await;
    let tinyurl = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "no-link" })))
        .expect(1)
        .mount(&bitly)
        .await;
    Mock::given(method("GET"))
        .and(path("/api-create.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Error"))
        .expect(1)
        .mount(&tinyurl)
        .await;

    let server = server_for(&providers_config(
        &bitly.uri(),
        &tinyurl.uri(),
        Duration::from_secs(2),
    ));

    let response = server
        .post("/shortlinks")
        .json(&json!({ "url": LONG_URL }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<serde_json::Value>()["name"], "Bad Gateway");
}
