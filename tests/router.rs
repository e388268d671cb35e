mod common;

use axum::ServiceExt as AxumServiceExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tower::ServiceExt;

use shorty::domain::ShorteningProviderName;
use shorty::routes::app_router;

use common::{create_test_state, ok, recorded};

#[tokio::test]
async fn test_shortlinks_with_trailing_slash() {
    let (state, calls) = create_test_state(
        vec![(ShorteningProviderName::Bitly, ok("https://bit.ly/abc"))],
        false,
    );
    let app = AxumServiceExt::<Request>::into_make_service(app_router(state));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/shortlinks/")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "url": "https://example.com", "link": "https://bit.ly/abc" })
    );
    assert_eq!(recorded(&calls), vec![ShorteningProviderName::Bitly]);
}

#[tokio::test]
async fn test_health_with_trailing_slash() {
    let (state, _calls) = create_test_state(
        vec![(ShorteningProviderName::Tinyurl, ok("https://tinyurl.com/xyz"))],
        false,
    );

    let response = app_router(state)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["providers"], json!(["tinyurl"]));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (state, _calls) = create_test_state(
        vec![(ShorteningProviderName::Bitly, ok("https://bit.ly/abc"))],
        false,
    );

    let response = app_router(state)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/links")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
