//! DTOs and validation for the shortlinks endpoint.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{ProviderRegistry, ShorteningProviderName};
use crate::error::AppError;
use crate::utils::url::parse_http_url;

/// Request to shorten a URL, as received on the wire.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShortlinksRequest {
    /// URL to shorten (must be an absolute HTTP/HTTPS URL).
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,

    /// Provider to use; all registered providers are tried when absent.
    #[serde(default)]
    pub provider: Option<String>,
}

/// A request that passed validation against the registered providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidShortlinksRequest {
    pub url: String,
    pub provider: Option<ShorteningProviderName>,
}

/// Successful shortening result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlinksResponse {
    /// Original long URL.
    pub url: String,
    /// Short link returned by the provider.
    pub link: String,
}

fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    parse_http_url(value).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("url");
        err.message = Some(e.to_string().into());
        err
    })
}

/// Validates inbound requests against the set of registered providers.
///
/// The allow-list is fixed at construction time, normally from the live
/// [`ProviderRegistry`], so the accepted `provider` values always match what
/// the dispatcher can serve.
#[derive(Debug, Clone)]
pub struct ShortlinksRequestValidator {
    allowed: Arc<[ShorteningProviderName]>,
}

impl ShortlinksRequestValidator {
    pub fn new(allowed: impl IntoIterator<Item = ShorteningProviderName>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn from_registry(registry: &ProviderRegistry) -> Self {
        Self::new(registry.names())
    }

    pub fn allowed(&self) -> &[ShorteningProviderName] {
        &self.allowed
    }

    /// Checks URL shape and provider membership.
    ///
    /// Surrounding whitespace is trimmed from `url`; the trimmed string is what
    /// gets shortened and echoed back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing every invalid field.
    pub fn validate(&self, request: ShortlinksRequest) -> Result<ValidShortlinksRequest, AppError> {
        let request = ShortlinksRequest {
            url: request.url.trim().to_string(),
            ..request
        };
        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);

        let provider = match request.provider.as_deref() {
            None => None,
            Some(raw) => {
                let name = raw
                    .parse::<ShorteningProviderName>()
                    .ok()
                    .filter(|name| self.allowed.contains(name));
                if name.is_none() {
                    errors.add("provider", self.unknown_provider_error(raw));
                }
                name
            }
        };

        if !errors.is_empty() {
            tracing::info!(errors = %errors, "Received invalid request");
            return Err(errors.into());
        }

        Ok(ValidShortlinksRequest {
            url: request.url,
            provider,
        })
    }

    fn unknown_provider_error(&self, given: &str) -> ValidationError {
        let permitted = self
            .allowed
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut err = ValidationError::new("unknown_provider");
        err.message = Some(format!("unexpected value '{given}'; permitted: {permitted}").into());
        err
    }
}
