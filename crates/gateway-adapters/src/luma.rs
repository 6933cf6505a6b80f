//! Luma Dream Machine video adapter.
//!
//! Video generation is job-style: the vendor answers with a generation
//! identifier and a state. A completed generation carries a downloadable
//! asset; anything else is surfaced as a pending job without blocking.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

const VENDOR: &str = "Luma";
const PROVIDER: &str = "luma";
const BASE_URL: &str = "https://api.lumalabs.ai";

#[derive(Debug, Serialize)]
struct GenerationRequestBody<'a> {
    prompt: &'a str,
    model: &'a str,
    duration: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponseBody {
    id: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    assets: Option<Assets>,
}

#[derive(Debug, Deserialize)]
struct Assets {
    #[serde(default)]
    video: Option<String>,
}

/// Dream Machine generations adapter.
pub struct LumaVideoAdapter {
    client: Client,
    base_url: String,
}

impl LumaVideoAdapter {
    /// Create an adapter targeting the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create an adapter targeting a custom base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Adapter for LumaVideoAdapter {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    async fn invoke(
        &self,
        _provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let video = payload
            .as_video()
            .ok_or_else(|| GatewayError::unexpected_payload(VENDOR, MediaKind::Video))?;

        debug!(model, duration = video.duration_seconds, "Luma generation");

        let response = self
            .client
            .post(format!("{}/dream-machine/v1/generations", self.base_url))
            .bearer_auth(credential.expose())
            .json(&GenerationRequestBody {
                prompt: &video.prompt,
                model,
                duration: format!("{}s", video.duration_seconds),
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let parsed: GenerationResponseBody = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        // Generations complete asynchronously; a synchronous completion with
        // an asset URL is the exception, not the rule.
        if parsed.state.as_deref() == Some("completed") {
            if let Some(url) = parsed.assets.and_then(|a| a.video) {
                return Ok(GenerationResult::video_url(PROVIDER, model, url));
            }
        }

        Ok(GenerationResult::video_job(PROVIDER, model, parsed.id))
    }
}
