//! DTOs for health check endpoint.

use serde::Serialize;

use crate::domain::ShorteningProviderName;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Registered providers in fallback order.
    pub providers: Vec<ShorteningProviderName>,
}
