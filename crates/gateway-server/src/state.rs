//! Shared application state.

use gateway_adapters::AdapterRegistry;
use gateway_core::{CredentialResolver, EnvCredentialResolver};
use gateway_dispatch::Dispatcher;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Read-only after construction: the registry is immutable and the
/// dispatcher stateless, so concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Create a new builder for `AppState`.
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// The dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The adapter registry.
    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        self.dispatcher.registry()
    }
}

/// Builder for [`AppState`].
///
/// The credential resolver is injected here; handlers and the dispatcher
/// never read the process environment themselves, so tests can supply a
/// fixed-map resolver.
#[derive(Default)]
pub struct AppStateBuilder {
    registry: Option<Arc<AdapterRegistry>>,
    credentials: Option<Arc<dyn CredentialResolver>>,
}

impl AppStateBuilder {
    /// Use a specific adapter registry.
    #[must_use]
    pub fn registry(mut self, registry: AdapterRegistry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    /// Use a specific credential resolver.
    #[must_use]
    pub fn credentials(mut self, resolver: impl CredentialResolver + 'static) -> Self {
        self.credentials = Some(Arc::new(resolver));
        self
    }

    /// Build the state, defaulting to the first-party adapters and the
    /// environment-backed credential resolver.
    #[must_use]
    pub fn build(self) -> AppState {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(AdapterRegistry::with_default_adapters()));
        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(EnvCredentialResolver::new()));

        AppState {
            dispatcher: Arc::new(Dispatcher::new(registry, credentials)),
        }
    }
}
