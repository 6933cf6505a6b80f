//! # Gateway Dispatch
//!
//! Routes a normalized generation request to the right vendor adapter.
//!
//! Dispatch is deliberately thin: resolve the credential, pick the adapter
//! (exact registry match, then the per-kind fallback), invoke it, and pass
//! its result or error through unchanged. Vendor concurrency limits, retries,
//! and rate limiting all belong elsewhere; dispatch is stateless and never
//! serializes concurrent calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use gateway_adapters::AdapterRegistry;
use gateway_core::{CredentialResolver, GatewayError, GatewayResult, GenerationRequest, GenerationResult};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Dispatches generation requests to vendor adapters.
pub struct Dispatcher {
    registry: Arc<AdapterRegistry>,
    credentials: Arc<dyn CredentialResolver>,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and an injected credential
    /// resolver.
    #[must_use]
    pub fn new(registry: Arc<AdapterRegistry>, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            registry,
            credentials,
        }
    }

    /// The registry this dispatcher selects from.
    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Dispatch one request to its adapter.
    ///
    /// The credential is resolved before any adapter runs, so a missing key
    /// fails without a single outbound call. Adapter errors propagate
    /// unchanged; the adapter is the only layer that understands vendor
    /// error formats, and the server is the only layer that maps errors to
    /// HTTP responses.
    ///
    /// # Errors
    /// `Credential` when no key is configured for the provider; otherwise
    /// whatever the adapter raised.
    #[instrument(skip(self, request), fields(provider = %request.provider, model = %request.model))]
    pub async fn dispatch(&self, request: &GenerationRequest) -> GatewayResult<GenerationResult> {
        let provider = request.provider.to_lowercase();

        let credential = self
            .credentials
            .resolve(&provider)
            .ok_or_else(|| GatewayError::credential(&provider))?;

        let adapter = self.registry.select(request.kind(), &provider);
        debug!(
            vendor = adapter.vendor(),
            kind = %request.kind(),
            "dispatching to adapter"
        );

        adapter
            .invoke(&provider, &credential, &request.model, &request.payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gateway_core::{
        Adapter, ApiCredential, GenerationPayload, ImagePayload, MediaKind,
        StaticCredentialResolver,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Adapter double that records invocations instead of calling anywhere.
    struct SpyAdapter {
        kind: MediaKind,
        calls: Arc<AtomicUsize>,
        seen_provider: std::sync::Mutex<Option<String>>,
    }

    impl SpyAdapter {
        fn new(kind: MediaKind) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let spy = Arc::new(Self {
                kind,
                calls: Arc::clone(&calls),
                seen_provider: std::sync::Mutex::new(None),
            });
            (spy, calls)
        }
    }

    #[async_trait]
    impl Adapter for SpyAdapter {
        fn vendor(&self) -> &str {
            "Spy"
        }

        fn kind(&self) -> MediaKind {
            self.kind
        }

        async fn invoke(
            &self,
            provider: &str,
            _credential: &ApiCredential,
            model: &str,
            _payload: &GenerationPayload,
        ) -> GatewayResult<GenerationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_provider.lock().expect("lock") = Some(provider.to_string());
            Ok(GenerationResult::image_url(
                "spy",
                model,
                "https://spy/img.png",
                None,
            ))
        }
    }

    fn image_request(provider: &str) -> GenerationRequest {
        GenerationRequest::new(
            provider,
            "model-x",
            GenerationPayload::Image(ImagePayload {
                prompt: "a spy".to_string(),
                size: "1024x1024".to_string(),
                quality: "standard".to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn test_dispatch_populates_provider_and_model() {
        let (spy, _) = SpyAdapter::new(MediaKind::Image);
        let registry = AdapterRegistry::builder().register("acme", spy).build();
        let resolver = StaticCredentialResolver::new().with_key("acme", "k");
        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(resolver));

        let result = dispatcher
            .dispatch(&image_request("acme"))
            .await
            .expect("dispatch result");
        assert!(!result.provider.is_empty());
        assert_eq!(result.model, "model-x");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_adapter_call() {
        let (spy, calls) = SpyAdapter::new(MediaKind::Image);
        let registry = AdapterRegistry::builder().register("acme", spy).build();
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            Arc::new(StaticCredentialResolver::new()),
        );

        let err = dispatcher
            .dispatch(&image_request("acme"))
            .await
            .expect_err("no credential configured");

        assert!(matches!(err, GatewayError::Credential { .. }));
        assert_eq!(err.to_string(), "API key not configured for acme");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_lookup_is_case_insensitive() {
        let (spy, calls) = SpyAdapter::new(MediaKind::Image);
        let registry = AdapterRegistry::builder().register("acme", spy).build();
        let resolver = StaticCredentialResolver::new().with_key("acme", "k");
        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(resolver));

        dispatcher
            .dispatch(&image_request("ACME"))
            .await
            .expect("dispatch result");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unregistered_provider_reaches_fallback_with_identifier() {
        // The fallback is the spy here, so the pass-through of the original
        // (non-matched) identifier is observable.
        let (spy, calls) = SpyAdapter::new(MediaKind::Image);
        let registry = AdapterRegistry::builder()
            .fallback(spy.clone() as Arc<dyn Adapter>)
            .build();
        let resolver = StaticCredentialResolver::new().with_key("unknown-vendor", "k");
        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(resolver));

        dispatcher
            .dispatch(&image_request("Unknown-Vendor"))
            .await
            .expect("fallback handled it");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            spy.seen_provider.lock().expect("lock").as_deref(),
            Some("unknown-vendor")
        );
    }

    #[tokio::test]
    async fn test_adapter_errors_propagate_unchanged() {
        struct FailingAdapter;

        #[async_trait]
        impl Adapter for FailingAdapter {
            fn vendor(&self) -> &str {
                "Failing"
            }
            fn kind(&self) -> MediaKind {
                MediaKind::Image
            }
            async fn invoke(
                &self,
                _provider: &str,
                _credential: &ApiCredential,
                _model: &str,
                _payload: &GenerationPayload,
            ) -> GatewayResult<GenerationResult> {
                Err(GatewayError::vendor("Failing", 503, "overloaded"))
            }
        }

        let registry = AdapterRegistry::builder()
            .register("failing", Arc::new(FailingAdapter))
            .build();
        let resolver = StaticCredentialResolver::new().with_key("failing", "k");
        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(resolver));

        let err = dispatcher
            .dispatch(&image_request("failing"))
            .await
            .expect_err("vendor failure");
        assert_eq!(err.to_string(), "Failing API error: overloaded");
        assert_eq!(err.source_status(), Some(503));
    }
}
