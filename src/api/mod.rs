//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into dispatch calls and formats
//! responses and errors according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects and request validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
