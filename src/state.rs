//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::api::dto::shortlinks::ShortlinksRequestValidator;
use crate::application::services::ShortLinkService;
use crate::domain::ProviderRegistry;

/// State shared by all request handlers.
///
/// Cheap to clone: the registry behind the service is reference-counted and
/// never mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub shortlink_service: Arc<ShortLinkService>,
    /// Allow-list built from the same registry the service dispatches to.
    pub validator: ShortlinksRequestValidator,
    /// Expose internal error details in 500 responses.
    pub debug: bool,
}

impl AppState {
    pub fn new(registry: Arc<ProviderRegistry>, debug: bool) -> Self {
        let validator = ShortlinksRequestValidator::from_registry(&registry);

        Self {
            shortlink_service: Arc::new(ShortLinkService::new(registry)),
            validator,
            debug,
        }
    }
}
