//! Application layer services implementing dispatch logic.
//!
//! This layer orchestrates domain operations: it selects which registered
//! providers to try for a request and in which order, and decides which
//! failure is surfaced. Services consume the domain registry and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortlink_service::ShortLinkService`] - Provider selection and fallback

pub mod services;
