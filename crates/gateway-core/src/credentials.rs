//! Credential resolution.
//!
//! The gateway never stores credentials; it consumes one per call, resolved
//! through the [`CredentialResolver`] capability injected at construction.
//! Tests supply a map-backed resolver instead of touching the process
//! environment.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// A vendor API key for a single call.
///
/// Wraps [`SecretString`] so the key is redacted from `Debug` output and
/// never serialized.
#[derive(Clone)]
pub struct ApiCredential(SecretString);

impl ApiCredential {
    /// Wrap a secret key string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::new(secret.into()))
    }

    /// Expose the key for constructing a vendor auth header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential([REDACTED])")
    }
}

/// Capability for resolving a provider identifier to its credential.
pub trait CredentialResolver: Send + Sync {
    /// Resolve the credential for `provider`, or `None` when unconfigured.
    fn resolve(&self, provider: &str) -> Option<ApiCredential>;
}

/// Resolver backed by process environment variables.
///
/// A provider identifier maps to `<PROVIDER_UPPERCASE>_API_KEY`, with hyphens
/// normalized to underscores (`stable-diffusion` → `STABLE_DIFFUSION_API_KEY`).
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialResolver;

impl EnvCredentialResolver {
    /// Create an environment-backed resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The environment variable name a provider identifier maps to.
    #[must_use]
    pub fn var_name(provider: &str) -> String {
        format!("{}_API_KEY", provider.to_uppercase().replace('-', "_"))
    }
}

impl CredentialResolver for EnvCredentialResolver {
    fn resolve(&self, provider: &str) -> Option<ApiCredential> {
        std::env::var(Self::var_name(provider))
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(ApiCredential::new)
    }
}

/// Resolver backed by a fixed map.
///
/// Used by tests and by embedders that manage keys themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    keys: HashMap<String, String>,
}

impl StaticCredentialResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential for a provider, lower-casing the identifier.
    #[must_use]
    pub fn with_key(mut self, provider: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(provider.into().to_lowercase(), key.into());
        self
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self, provider: &str) -> Option<ApiCredential> {
        self.keys
            .get(&provider.to_lowercase())
            .map(ApiCredential::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_name_convention() {
        assert_eq!(EnvCredentialResolver::var_name("openai"), "OPENAI_API_KEY");
        assert_eq!(
            EnvCredentialResolver::var_name("elevenlabs"),
            "ELEVENLABS_API_KEY"
        );
        assert_eq!(
            EnvCredentialResolver::var_name("stable-diffusion"),
            "STABLE_DIFFUSION_API_KEY"
        );
    }

    #[test]
    fn test_static_resolver_is_case_insensitive() {
        let resolver = StaticCredentialResolver::new().with_key("OpenAI", "sk-test");
        let credential = resolver.resolve("openai").expect("configured key");
        assert_eq!(credential.expose(), "sk-test");
        assert!(resolver.resolve("anthropic").is_none());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = ApiCredential::new("sk-very-secret");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("sk-very-secret"));
    }
}
