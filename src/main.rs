//! # AI Media Gateway
//!
//! BYOK gateway routing text, image, voice, and video generation requests to
//! third-party AI vendors behind one normalized contract.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (0.0.0.0:8080)
//! ai-media-gateway
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 OPENAI_API_KEY=sk-... ai-media-gateway
//! ```
//!
//! Credentials are resolved per provider from `<PROVIDER>_API_KEY`
//! environment variables; unknown providers route through the
//! OpenAI-compatible fallback adapter.

use gateway_adapters::AdapterRegistry;
use gateway_core::{EnvCredentialResolver, MediaKind};
use gateway_server::{AppState, Server, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting AI Media Gateway"
    );

    if let Err(e) = run().await {
        error!(error = %e, "Application failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run() -> std::io::Result<()> {
    let config = ServerConfig::from_env();

    info!(host = %config.host, port = config.port, "Configuration loaded");

    let registry = AdapterRegistry::with_default_adapters();
    info!(
        adapters = registry.len(),
        text = ?registry.provider_ids(MediaKind::Text),
        image = ?registry.provider_ids(MediaKind::Image),
        voice = ?registry.provider_ids(MediaKind::Voice),
        video = ?registry.provider_ids(MediaKind::Video),
        "Adapter registry initialized"
    );

    let state = AppState::builder()
        .registry(registry)
        .credentials(EnvCredentialResolver::new())
        .build();

    Server::new(config, state).run().await
}
