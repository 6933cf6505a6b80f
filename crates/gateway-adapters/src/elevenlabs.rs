//! ElevenLabs speech adapter.
//!
//! Auth is the vendor's `xi-api-key` header; the voice identifier lives in
//! the URL path rather than the body. The response is raw audio bytes,
//! converted to a data-URI reference like every other voice adapter.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind,
};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::http;

const VENDOR: &str = "ElevenLabs";
const PROVIDER: &str = "elevenlabs";
const BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default voice identifier ("Rachel") when a request names none.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// Text-to-speech adapter.
pub struct ElevenLabsSpeechAdapter {
    client: Client,
    base_url: String,
}

impl ElevenLabsSpeechAdapter {
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
impl Adapter for ElevenLabsSpeechAdapter {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Voice
    }

    async fn invoke(
        &self,
        _provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let voice = payload
            .as_voice()
            .ok_or_else(|| GatewayError::unexpected_payload(VENDOR, MediaKind::Voice))?;

        let voice_id = voice.voice.as_deref().unwrap_or(DEFAULT_VOICE_ID);
        debug!(model, voice = voice_id, "ElevenLabs text-to-speech");

        let response = self
            .client
            .post(format!("{}/text-to-speech/{voice_id}", self.base_url))
            .header("xi-api-key", credential.expose())
            .json(&TextToSpeechRequest {
                text: &voice.text,
                model_id: model,
            })
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

        Ok(GenerationResult::audio(
            PROVIDER,
            model,
            http::data_uri("audio/mp3", &bytes),
        ))
    }
}
