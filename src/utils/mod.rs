//! Utility functions for URL processing and logging.
//!
//! - [`url`] - HTTP(S) URL validation and provider endpoint joining
//! - [`truncate`] - Bounded rendering of long values in log lines

pub mod truncate;
pub mod url;
