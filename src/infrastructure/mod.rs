//! Infrastructure layer for external integrations.
//!
//! This layer implements the [`crate::domain::Shortener`] contract on top of
//! real third-party shortening services.
//!
//! # Modules
//!
//! - [`providers`] - HTTP-backed shortening providers and registry factory

pub mod providers;
