//! Stability AI image adapter.
//!
//! The stable-image endpoint takes a multipart form and, with `Accept:
//! image/*`, answers with raw image bytes instead of JSON. The bytes are
//! converted into an addressable data-URI reference so the normalized result
//! carries a retrievable handle, not inline binary.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind,
};
use reqwest::multipart::Form;
use reqwest::Client;
use tracing::debug;

use crate::http;

const VENDOR: &str = "Stability AI";
const PROVIDER: &str = "stability";
const BASE_URL: &str = "https://api.stability.ai";

/// Stable-image generation adapter.
pub struct StabilityImageAdapter {
    client: Client,
    base_url: String,
}

impl StabilityImageAdapter {
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

    // "1024x1024" → "1:1". The endpoint wants a reduced ratio, not pixels.
    fn aspect_ratio(size: &str) -> String {
        let Some((w, h)) = size.split_once('x') else {
            return "1:1".to_string();
        };
        let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) else {
            return "1:1".to_string();
        };
        if w == 0 || h == 0 {
            return "1:1".to_string();
        }
        let d = gcd(w, h);
        format!("{}:{}", w / d, h / d)
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[async_trait]
impl Adapter for StabilityImageAdapter {
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

        debug!(model, size = %image.size, "Stability image generation");

        let form = Form::new()
            .text("prompt", image.prompt.clone())
            .text("aspect_ratio", Self::aspect_ratio(&image.size))
            .text("output_format", "png");

        let response = self
            .client
            .post(format!(
                "{}/v2beta/stable-image/generate/{model}",
                self.base_url
            ))
            .bearer_auth(credential.expose())
            .header("accept", "image/*")
            .multipart(form)
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        Ok(GenerationResult::image_url(
            PROVIDER,
            model,
            http::data_uri("image/png", &bytes),
            None,
        ))
    }
}
