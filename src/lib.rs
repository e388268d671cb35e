//! # Shorty
//!
//! A URL-shortening gateway: one HTTP endpoint that accepts a long URL and an
//! optional provider name, delegates the shortening to a third-party provider
//! (Bitly, TinyURL), and returns a normalized response.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - `Shortener` contract, error taxonomy, provider registry
//! - **Application Layer** ([`application`]) - Provider selection and fallback dispatch
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP-backed provider implementations
//! - **API Layer** ([`api`]) - REST handlers, DTOs, validation and middleware
//!
//! ## Dispatch
//!
//! A request naming a provider is served by that provider only. Without a
//! name, registered providers are tried one after another in configured order
//! until one succeeds; when all fail, the last failure decides the response
//! (504 for timeouts, 502 for request/response failures, 500 otherwise).
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORTY_BITLY_API_KEY="..."
//! cargo run
//!
//! curl -X POST localhost:8080/shortlinks \
//!      -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com/long", "provider": "tinyurl"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortLinkService;
    pub use crate::domain::{
        ProviderRegistry, RegisteredProvider, Shortener, ShortenerError, ShorteningProviderName,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
