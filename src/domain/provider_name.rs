//! Identifier of a shortening provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names of the shortening providers the gateway knows how to build.
///
/// The set of names accepted by the API at runtime is the subset actually
/// registered in the [`crate::domain::registry::ProviderRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShorteningProviderName {
    Bitly,
    Tinyurl,
}

impl ShorteningProviderName {
    /// All known provider names, in default registration order.
    pub const ALL: [ShorteningProviderName; 2] = [Self::Bitly, Self::Tinyurl];

    /// Returns the wire representation of the name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bitly => "bitly",
            Self::Tinyurl => "tinyurl",
        }
    }
}

impl fmt::Display for ShorteningProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shortening provider '{0}'")]
pub struct UnknownProviderName(pub String);

impl FromStr for ShorteningProviderName {
    type Err = UnknownProviderName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownProviderName(s.to_string()))
    }
}
