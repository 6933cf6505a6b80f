//! HTTP server entry point.

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// The gateway HTTP server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server over prepared state.
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind and serve until the process exits.
    ///
    /// # Errors
    /// Returns an error when the listener cannot bind or the server loop
    /// fails.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.addr()).await?;
        info!(addr = %listener.local_addr()?, "gateway listening");
        axum::serve(listener, create_router(self.state)).await
    }
}
