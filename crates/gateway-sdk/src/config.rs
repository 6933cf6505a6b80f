//! Client configuration.

use std::time::Duration;
use url::Url;

/// Configuration for the gateway client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// User-agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8080").expect("static URL is valid"),
            timeout: Duration::from_secs(120),
            user_agent: concat!("ai-media-gateway-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
