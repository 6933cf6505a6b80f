//! OpenAI adapter implementations.
//!
//! Three endpoints behind one auth scheme (`Authorization: Bearer`):
//! - `/chat/completions` for text
//! - `/images/generations` for DALL-E-shaped image generation
//! - `/audio/speech` for binary speech synthesis

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind, TextPayload,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

const VENDOR: &str = "OpenAI";
const PROVIDER: &str = "openai";
const BASE_URL: &str = "https://api.openai.com/v1";

/// Default voice when a speech request names none.
pub const DEFAULT_VOICE: &str = "alloy";

// Wire shapes shared with the OpenAI-compatible fallback.

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub(crate) fn from_payload(model: &'a str, payload: &TextPayload) -> Self {
        Self {
            model,
            messages: payload
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: payload.temperature,
            max_tokens: payload.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage {
    pub(crate) role: String,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub(crate) choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub(crate) message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: Option<String>,
    b64_json: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

/// Chat completion adapter.
pub struct OpenAiChatAdapter {
    client: Client,
    base_url: String,
}

impl OpenAiChatAdapter {
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
impl Adapter for OpenAiChatAdapter {
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

        debug!(model, messages = text.messages.len(), "OpenAI chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential.expose())
            .json(&ChatCompletionRequest::from_payload(model, text))
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let status = response.status().as_u16();
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::vendor(VENDOR, status, "response contained no choices"))?;

        Ok(GenerationResult::text(PROVIDER, model, content))
    }
}

/// DALL-E-shaped image generation adapter.
///
/// The vendor returns a JSON body with one or more generated-image URLs;
/// index 0 is canonical. The optional `revised_prompt` rewrite is passed
/// through as secondary metadata.
pub struct OpenAiImageAdapter {
    client: Client,
    base_url: String,
}

impl OpenAiImageAdapter {
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
impl Adapter for OpenAiImageAdapter {
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

        debug!(model, size = %image.size, "OpenAI image generation");

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(credential.expose())
            .json(&ImageGenerationRequest {
                model,
                prompt: &image.prompt,
                n: 1,
                size: &image.size,
                quality: &image.quality,
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let status = response.status().as_u16();
        let parsed: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::vendor(VENDOR, status, "response contained no images"))?;

        let url = match (first.url, first.b64_json) {
            (Some(url), _) => url,
            (None, Some(b64)) => format!("data:image/png;base64,{b64}"),
            (None, None) => {
                return Err(GatewayError::vendor(
                    VENDOR,
                    status,
                    "image entry carried neither url nor b64_json",
                ))
            }
        };

        Ok(GenerationResult::image_url(
            PROVIDER,
            model,
            url,
            first.revised_prompt,
        ))
    }
}

/// Binary speech synthesis adapter.
pub struct OpenAiSpeechAdapter {
    client: Client,
    base_url: String,
}

impl OpenAiSpeechAdapter {
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
impl Adapter for OpenAiSpeechAdapter {
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

        let voice_id = voice.voice.as_deref().unwrap_or(DEFAULT_VOICE);
        debug!(model, voice = voice_id, "OpenAI speech synthesis");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(credential.expose())
            .json(&SpeechRequest {
                model,
                input: &voice.text,
                voice: voice_id,
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

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{ChatMessage, ImagePayload, VoicePayload};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> ApiCredential {
        ApiCredential::new("sk-test")
    }

    fn image_payload(prompt: &str) -> GenerationPayload {
        GenerationPayload::Image(ImagePayload {
            prompt: prompt.to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        })
    }

    #[tokio::test]
    async fn test_image_response_normalization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"url": "https://x/img.png", "revised_prompt": "p2"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = OpenAiImageAdapter::with_base_url(Client::new(), server.uri());
        let result = adapter
            .invoke("openai", &credential(), "dall-e-3", &image_payload("a lighthouse"))
            .await
            .expect("normalized result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["provider"], "openai");
        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["imageUrl"], "https://x/img.png");
        assert_eq!(json["revisedPrompt"], "p2");
    }

    #[tokio::test]
    async fn test_image_first_entry_is_canonical() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"url": "https://x/first.png"}, {"url": "https://x/second.png"}]
            })))
            .mount(&server)
            .await;

        let adapter = OpenAiImageAdapter::with_base_url(Client::new(), server.uri());
        let result = adapter
            .invoke("openai", &credential(), "dall-e-3", &image_payload("two options"))
            .await
            .expect("normalized result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["imageUrl"], "https://x/first.png");
    }

    #[tokio::test]
    async fn test_vendor_error_embeds_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let adapter = OpenAiImageAdapter::with_base_url(Client::new(), server.uri());
        let err = adapter
            .invoke("openai", &credential(), "dall-e-3", &image_payload("anything"))
            .await
            .expect_err("vendor error");

        assert_eq!(err.source_status(), Some(429));
        let message = err.to_string();
        assert!(message.contains("OpenAI"));
        assert!(message.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_chat_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "hello"}}]
            })))
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::with_base_url(Client::new(), server.uri());
        let payload = GenerationPayload::Text(gateway_core::TextPayload {
            messages: vec![ChatMessage::user("hi")],
            temperature: Some(0.7),
            max_tokens: None,
        });
        let result = adapter
            .invoke("openai", &credential(), "gpt-4o", &payload)
            .await
            .expect("chat result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["provider"], "openai");
    }

    #[tokio::test]
    async fn test_speech_converts_binary_to_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(body_partial_json(serde_json::json!({"voice": "alloy"})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ABC".to_vec()))
            .mount(&server)
            .await;

        let adapter = OpenAiSpeechAdapter::with_base_url(Client::new(), server.uri());
        let payload = GenerationPayload::Voice(VoicePayload {
            text: "hello".to_string(),
            voice: None,
        });
        let result = adapter
            .invoke("openai", &credential(), "tts-1", &payload)
            .await
            .expect("speech result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["audioUrl"], "data:audio/mp3;base64,QUJD");
    }

    #[tokio::test]
    async fn test_wrong_payload_kind_is_rejected_without_a_call() {
        let adapter = OpenAiImageAdapter::with_base_url(Client::new(), "http://127.0.0.1:1");
        let payload = GenerationPayload::Voice(VoicePayload {
            text: "hello".to_string(),
            voice: None,
        });
        let err = adapter
            .invoke("openai", &credential(), "dall-e-3", &payload)
            .await
            .expect_err("payload mismatch");
        assert!(matches!(err, GatewayError::UnexpectedPayload { .. }));
    }
}
