//! API route configuration.

use crate::api::handlers::{health_handler, shortlinks_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shortlinks` - Shorten a URL via the registered providers
/// - `GET  /health`     - Service status and registered providers
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shortlinks", post(shortlinks_handler))
        .route("/health", get(health_handler))
}
