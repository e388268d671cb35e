//! Read-only registry of configured shortening providers.

use std::sync::Arc;

use crate::domain::provider_name::ShorteningProviderName;
use crate::domain::shortener::Shortener;

/// A provider instance together with the name it is registered under.
#[derive(Clone)]
pub struct RegisteredProvider {
    pub name: ShorteningProviderName,
    pub shortener: Arc<dyn Shortener>,
}

impl std::fmt::Debug for RegisteredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Shortening provider '{0}' is registered more than once")]
    Duplicate(ShorteningProviderName),

    #[error("At least one shortening provider must be registered")]
    Empty,
}

/// Ordered mapping from provider name to provider instance.
///
/// Built once at startup and never mutated afterwards. Iteration order is the
/// registration order, which is the order used for fallback dispatch.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
}

impl ProviderRegistry {
    /// Builds a registry from `(name, provider)` pairs, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if a name appears twice and
    /// [`RegistryError::Empty`] if no provider is given.
    pub fn new(
        entries: impl IntoIterator<Item = (ShorteningProviderName, Arc<dyn Shortener>)>,
    ) -> Result<Self, RegistryError> {
        let mut providers: Vec<RegisteredProvider> = Vec::new();

        for (name, shortener) in entries {
            if providers.iter().any(|p| p.name == name) {
                return Err(RegistryError::Duplicate(name));
            }
            providers.push(RegisteredProvider { name, shortener });
        }

        if providers.is_empty() {
            return Err(RegistryError::Empty);
        }

        Ok(Self { providers })
    }

    /// Looks up a provider by name.
    pub fn get(&self, name: ShorteningProviderName) -> Option<&RegisteredProvider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<ShorteningProviderName> {
        self.providers.iter().map(|p| p.name).collect()
    }

    /// All registered providers in registration order.
    pub fn providers(&self) -> &[RegisteredProvider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
