//! Adapter registry.
//!
//! Maps lower-cased provider identifiers to adapters, one table per media
//! kind, each with exactly one fallback. Built once at startup and immutable
//! thereafter; lookup is exact match, then fallback, never an error. The
//! two-tier lookup is the gateway's openness mechanism: an unregistered
//! OpenAI-compatible vendor works with no code change.

use gateway_core::{Adapter, MediaKind};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::fallback::OpenAiCompatibleAdapter;
use crate::{
    AnthropicChatAdapter, ElevenLabsSpeechAdapter, GeminiChatAdapter, GoogleSpeechAdapter,
    LumaVideoAdapter, MidjourneyImageAdapter, OpenAiChatAdapter, OpenAiImageAdapter,
    OpenAiSpeechAdapter, StabilityImageAdapter,
};

const KINDS: [MediaKind; 4] = [
    MediaKind::Text,
    MediaKind::Image,
    MediaKind::Voice,
    MediaKind::Video,
];

struct KindTable {
    entries: HashMap<String, Arc<dyn Adapter>>,
    fallback: Arc<dyn Adapter>,
}

/// Immutable provider-identifier → adapter mapping.
pub struct AdapterRegistry {
    tables: HashMap<MediaKind, KindTable>,
}

impl AdapterRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder::default()
    }

    /// Build the registry with every first-party adapter registered.
    #[must_use]
    pub fn with_default_adapters() -> Self {
        let client = Client::new();
        Self::builder()
            .register("openai", Arc::new(OpenAiChatAdapter::new(client.clone())))
            .register(
                "anthropic",
                Arc::new(AnthropicChatAdapter::new(client.clone())),
            )
            .register("google", Arc::new(GeminiChatAdapter::new(client.clone())))
            .register("openai", Arc::new(OpenAiImageAdapter::new(client.clone())))
            .register(
                "stability",
                Arc::new(StabilityImageAdapter::new(client.clone())),
            )
            .register(
                "midjourney",
                Arc::new(MidjourneyImageAdapter::new(client.clone())),
            )
            .register("openai", Arc::new(OpenAiSpeechAdapter::new(client.clone())))
            .register(
                "elevenlabs",
                Arc::new(ElevenLabsSpeechAdapter::new(client.clone())),
            )
            .register("google", Arc::new(GoogleSpeechAdapter::new(client.clone())))
            .register("luma", Arc::new(LumaVideoAdapter::new(client)))
            .build()
    }

    /// Select the adapter for a provider identifier.
    ///
    /// Lower-cases the identifier, takes the exact match when one is
    /// registered for the request's media kind, and otherwise hands back that
    /// kind's fallback. A fallback always exists, so selection never fails.
    #[must_use]
    pub fn select(&self, kind: MediaKind, provider: &str) -> Arc<dyn Adapter> {
        let table = &self.tables[&kind];
        match table.entries.get(&provider.to_lowercase()) {
            Some(adapter) => Arc::clone(adapter),
            None => {
                debug!(provider, %kind, "no exact adapter match, using fallback");
                Arc::clone(&table.fallback)
            }
        }
    }

    /// Whether an exact (non-fallback) adapter is registered.
    #[must_use]
    pub fn is_registered(&self, kind: MediaKind, provider: &str) -> bool {
        self.tables[&kind]
            .entries
            .contains_key(&provider.to_lowercase())
    }

    /// Registered provider identifiers for a media kind, sorted.
    #[must_use]
    pub fn provider_ids(&self, kind: MediaKind) -> Vec<String> {
        let mut ids: Vec<String> = self.tables[&kind].entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Total number of registered (non-fallback) adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.entries.len()).sum()
    }

    /// Whether no adapter is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for [`AdapterRegistry`].
#[derive(Default)]
pub struct AdapterRegistryBuilder {
    entries: Vec<(String, Arc<dyn Adapter>)>,
    fallbacks: HashMap<MediaKind, Arc<dyn Adapter>>,
}

impl AdapterRegistryBuilder {
    /// Register an adapter under a provider identifier.
    ///
    /// The media kind is taken from the adapter itself; the identifier is
    /// lower-cased. Registering the same identifier twice for one kind keeps
    /// the later adapter.
    #[must_use]
    pub fn register(mut self, provider: impl Into<String>, adapter: Arc<dyn Adapter>) -> Self {
        self.entries.push((provider.into().to_lowercase(), adapter));
        self
    }

    /// Replace the fallback adapter for the adapter's media kind.
    #[must_use]
    pub fn fallback(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.fallbacks.insert(adapter.kind(), adapter);
        self
    }

    /// Finish the registry.
    ///
    /// Any media kind without an explicit fallback gets the
    /// OpenAI-compatible generic adapter, so exactly one fallback exists per
    /// kind by construction.
    #[must_use]
    pub fn build(mut self) -> AdapterRegistry {
        let client = Client::new();
        let mut tables = HashMap::new();

        for kind in KINDS {
            let fallback = self
                .fallbacks
                .remove(&kind)
                .unwrap_or_else(|| Arc::new(OpenAiCompatibleAdapter::new(kind, client.clone())));
            tables.insert(
                kind,
                KindTable {
                    entries: HashMap::new(),
                    fallback,
                },
            );
        }

        for (provider, adapter) in self.entries {
            let kind = adapter.kind();
            if let Some(table) = tables.get_mut(&kind) {
                table.entries.insert(provider, adapter);
            }
        }

        AdapterRegistry { tables }
    }
}
