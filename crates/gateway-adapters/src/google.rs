//! Google adapter implementations.
//!
//! Two distinct Google APIs share the key-in-query auth scheme:
//! - Gemini chat via `generativelanguage.googleapis.com`
//! - Cloud Text-to-Speech via `texttospeech.googleapis.com`, which returns
//!   base64 audio inside JSON rather than raw bytes

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind, MessageRole,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

const VENDOR: &str = "Google";
const PROVIDER: &str = "google";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const TTS_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Default Cloud TTS voice when a request names none.
pub const DEFAULT_TTS_VOICE: &str = "en-US-Standard-A";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig<'a> {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

/// Gemini chat adapter.
pub struct GeminiChatAdapter {
    client: Client,
    base_url: String,
}

impl GeminiChatAdapter {
    /// Create an adapter targeting the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, GEMINI_BASE_URL)
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
impl Adapter for GeminiChatAdapter {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Text
    }

    async fn invoke(
        &self,
        _provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let text = payload
            .as_text()
            .ok_or_else(|| GatewayError::unexpected_payload(VENDOR, MediaKind::Text))?;

        // Gemini calls the assistant role "model" and keeps system
        // instructions outside the contents list.
        let mut system_parts = Vec::new();
        let mut contents = Vec::with_capacity(text.messages.len());
        for message in &text.messages {
            match message.role {
                MessageRole::System => system_parts.push(Part {
                    text: message.content.clone(),
                }),
                MessageRole::User | MessageRole::Assistant => contents.push(Content {
                    role: Some(
                        if message.role == MessageRole::Assistant {
                            "model"
                        } else {
                            "user"
                        }
                        .to_string(),
                    ),
                    parts: vec![Part {
                        text: message.content.clone(),
                    }],
                }),
            }
        }

        let generation_config = if text.temperature.is_some() || text.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: text.temperature,
                max_output_tokens: text.max_tokens,
            })
        } else {
            None
        };

        debug!(model, contents = contents.len(), "Gemini generateContent");

        let response = self
            .client
            .post(format!(
                "{}/models/{model}:generateContent",
                self.base_url
            ))
            .query(&[("key", credential.expose())])
            .json(&GenerateContentRequest {
                contents,
                system_instruction: (!system_parts.is_empty()).then(|| Content {
                    role: None,
                    parts: system_parts,
                }),
                generation_config,
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let status = response.status().as_u16();
        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        let content = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                GatewayError::vendor(VENDOR, status, "response contained no candidates")
            })?;

        Ok(GenerationResult::text(PROVIDER, model, content))
    }
}

/// Cloud Text-to-Speech adapter.
///
/// The one voice vendor that returns base64 audio inside JSON. A data-URI
/// reference is synthesized from the payload so the output shape matches the
/// binary vendors, and the raw base64 rides along as secondary metadata.
pub struct GoogleSpeechAdapter {
    client: Client,
    base_url: String,
}

impl GoogleSpeechAdapter {
    /// Create an adapter targeting the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, TTS_BASE_URL)
    }

    /// Create an adapter targeting a custom base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    // Voice names embed their language ("en-US-Standard-A" → "en-US").
    fn language_code(voice: &str) -> &str {
        match voice.match_indices('-').nth(1) {
            Some((index, _)) => &voice[..index],
            None => "en-US",
        }
    }
}

#[async_trait]
impl Adapter for GoogleSpeechAdapter {
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

        let voice_name = voice.voice.as_deref().unwrap_or(DEFAULT_TTS_VOICE);
        debug!(model, voice = voice_name, "Google TTS synthesize");

        let response = self
            .client
            .post(format!("{}/text:synthesize", self.base_url))
            .query(&[("key", credential.expose())])
            .json(&SynthesizeRequest {
                input: SynthesisInput { text: &voice.text },
                voice: VoiceSelection {
                    language_code: Self::language_code(voice_name),
                    name: voice_name,
                },
                audio_config: AudioConfig {
                    audio_encoding: "MP3",
                },
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        Ok(GenerationResult::audio_with_content(
            PROVIDER,
            model,
            http::audio_data_uri(&parsed.audio_content),
            parsed.audio_content,
        ))
    }
}
