//! Midjourney image adapter (relay API).
//!
//! Midjourney has no first-party API; relay services accept an imagine
//! request and answer with only a job identifier. The adapter surfaces that
//! identifier with a "processing" status instead of blocking: the result is
//! not available synchronously and this layer never polls.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

const VENDOR: &str = "Midjourney";
const PROVIDER: &str = "midjourney";
const BASE_URL: &str = "https://api.userapi.ai";

#[derive(Debug, Serialize)]
struct ImagineRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImagineResponse {
    // Relay deployments disagree on the field name for the job handle.
    #[serde(alias = "hash", alias = "messageId")]
    message_id: String,
}

/// Asynchronous imagine-job adapter.
pub struct MidjourneyImageAdapter {
    client: Client,
    base_url: String,
}

impl MidjourneyImageAdapter {
    /// Create an adapter targeting the relay API.
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
impl Adapter for MidjourneyImageAdapter {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    async fn invoke(
        &self,
        _provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let image = payload
            .as_image()
            .ok_or_else(|| GatewayError::unexpected_payload(VENDOR, MediaKind::Image))?;

        debug!(model, "Midjourney imagine job");

        let response = self
            .client
            .post(format!("{}/midjourney/v2/imagine", self.base_url))
            .header("api-key", credential.expose())
            .json(&ImagineRequest {
                prompt: &image.prompt,
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let parsed: ImagineResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        Ok(GenerationResult::image_job(
            PROVIDER,
            model,
            parsed.message_id,
        ))
    }
}
