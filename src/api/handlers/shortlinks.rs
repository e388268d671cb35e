//! Handler for the shortlinks endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::shortlinks::{ShortlinksRequest, ShortlinksResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::truncate::{LOG_VALUE_MAX_CHARS, truncate_for_log};

/// Shortens a URL through one or all registered providers.
///
/// # Endpoint
///
/// `POST /shortlinks`
///
/// # Provider Selection
///
/// When `provider` is given, only that provider is used. Otherwise every
/// registered provider is tried in registry order until one succeeds; if all
/// fail, the last provider's error decides the response.
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/path",
///   "provider": "tinyurl"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com/very/long/path",
///   "link": "https://tinyurl.com/y3x4abcd"
/// }
/// ```
///
/// # Errors
///
/// - **422** malformed body, invalid URL or unregistered provider
/// - **502** provider request failed or answered with an invalid response
/// - **504** provider timed out
/// - **500** any other failure
pub async fn shortlinks_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortlinksRequest>, JsonRejection>,
) -> Result<Json<ShortlinksResponse>, AppError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        tracing::info!(error = %rejection.body_text(), "Received malformed request body");
    })?;

    let request = state.validator.validate(payload)?;
    tracing::info!(
        provider = ?request.provider.map(|p| p.as_str()),
        long_url = %truncate_for_log(&request.url, LOG_VALUE_MAX_CHARS),
        "Received shortening request"
    );

    let link = state
        .shortlink_service
        .shorten(&request.url, request.provider)
        .await
        .map_err(|e| AppError::from_shortener_error(e, state.debug))?;

    let response = ShortlinksResponse {
        url: request.url,
        link,
    };
    tracing::debug!(response = ?response, "Prepared response");

    Ok(Json(response))
}
