//! Domain layer containing the shortening contract and provider registry.
//!
//! This module defines what a shortening provider is and how providers are
//! grouped, independent of HTTP clients or web frameworks.
//!
//! # Architecture
//!
//! - [`shortener`] - The [`shortener::Shortener`] trait and its error taxonomy
//! - [`provider_name`] - Enumeration of provider identifiers
//! - [`registry`] - Ordered, read-only registry built at startup
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Provider implementations live in [`crate::infrastructure::providers`]
//! - Dispatch and fallback live in [`crate::application::services`]

pub mod provider_name;
pub mod registry;
pub mod shortener;

pub use provider_name::ShorteningProviderName;
pub use registry::{ProviderRegistry, RegisteredProvider, RegistryError};
pub use shortener::{Shortener, ShortenerError};

#[cfg(test)]
pub use shortener::MockShortener;
