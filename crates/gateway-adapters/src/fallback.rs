//! Generic OpenAI-compatible fallback adapter.
//!
//! Used for any provider identifier with no registered adapter. The provider
//! identifier flows through from the dispatcher so the base URL can still be
//! vendor-specific (`https://api.<provider>.com/v1`), and the identifier is
//! echoed back in the result. New vendors that expose an OpenAI-compatible
//! contract therefore work without adapter registration.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;
use crate::openai::{ChatCompletionRequest, ChatCompletionResponse, DEFAULT_VOICE};

#[derive(Debug, Serialize)]
struct GenerationRequestBody<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SpeechRequestBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

// The two response shapes OpenAI-compatible media vendors are known to use.

#[derive(Debug, Deserialize)]
struct DataUrlResponse {
    data: Vec<DataUrlEntry>,
}

#[derive(Debug, Deserialize)]
struct DataUrlEntry {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultSampleResponse {
    result: SampleEntry,
}

#[derive(Debug, Deserialize)]
struct SampleEntry {
    sample: String,
}

/// Fallback adapter assuming an OpenAI-compatible contract.
///
/// One instance exists per media kind; the registry installs it wherever no
/// exact provider match is found.
pub struct OpenAiCompatibleAdapter {
    kind: MediaKind,
    client: Client,
    base_url_override: Option<String>,
}

impl OpenAiCompatibleAdapter {
    /// Create a fallback adapter for one media kind.
    #[must_use]
    pub fn new(kind: MediaKind, client: Client) -> Self {
        Self {
            kind,
            client,
            base_url_override: None,
        }
    }

    /// Create a fallback adapter pinned to a fixed base URL.
    #[must_use]
    pub fn with_base_url(kind: MediaKind, client: Client, base_url: impl Into<String>) -> Self {
        Self {
            kind,
            client,
            base_url_override: Some(base_url.into()),
        }
    }

    fn base_url(&self, provider: &str) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| format!("https://api.{provider}.com/v1"))
    }

    /// Pull a media URL out of either known response shape.
    fn extract_media_url(
        provider: &str,
        status: u16,
        value: serde_json::Value,
    ) -> GatewayResult<String> {
        if let Ok(parsed) = serde_json::from_value::<DataUrlResponse>(value.clone()) {
            if let Some(url) = parsed.data.into_iter().next().and_then(|d| d.url) {
                return Ok(url);
            }
        }

        if let Ok(parsed) = serde_json::from_value::<ResultSampleResponse>(value) {
            return Ok(parsed.result.sample);
        }

        Err(GatewayError::vendor(
            provider,
            status,
            "response matched neither data[].url nor result.sample",
        ))
    }

    async fn invoke_text(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let text = payload
            .as_text()
            .ok_or_else(|| GatewayError::unexpected_payload(provider, MediaKind::Text))?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url(provider)))
            .bearer_auth(credential.expose())
            .json(&ChatCompletionRequest::from_payload(model, text))
            .send()
            .await
            .map_err(|e| http::transport(provider, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(provider, response).await);
        }

        let status = response.status().as_u16();
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| http::transport(provider, e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                GatewayError::vendor(provider, status, "response contained no choices")
            })?;

        Ok(GenerationResult::text(provider, model, content))
    }

    async fn invoke_image(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let image = payload
            .as_image()
            .ok_or_else(|| GatewayError::unexpected_payload(provider, MediaKind::Image))?;

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url(provider)))
            .bearer_auth(credential.expose())
            .json(&GenerationRequestBody {
                model,
                prompt: &image.prompt,
                size: Some(&image.size),
                duration: None,
            })
            .send()
            .await
            .map_err(|e| http::transport(provider, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(provider, response).await);
        }

        let status = response.status().as_u16();
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| http::transport(provider, e))?;

        let url = Self::extract_media_url(provider, status, value)?;
        Ok(GenerationResult::image_url(provider, model, url, None))
    }

    async fn invoke_voice(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let voice = payload
            .as_voice()
            .ok_or_else(|| GatewayError::unexpected_payload(provider, MediaKind::Voice))?;

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url(provider)))
            .bearer_auth(credential.expose())
            .json(&SpeechRequestBody {
                model,
                input: &voice.text,
                voice: voice.voice.as_deref().unwrap_or(DEFAULT_VOICE),
            })
            .send()
            .await
            .map_err(|e| http::transport(provider, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(provider, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| http::transport(provider, e))?;

        Ok(GenerationResult::audio(
            provider,
            model,
            http::data_uri("audio/mp3", &bytes),
        ))
    }

    async fn invoke_video(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let video = payload
            .as_video()
            .ok_or_else(|| GatewayError::unexpected_payload(provider, MediaKind::Video))?;

        let response = self
            .client
            .post(format!("{}/videos/generations", self.base_url(provider)))
            .bearer_auth(credential.expose())
            .json(&GenerationRequestBody {
                model,
                prompt: &video.prompt,
                size: None,
                duration: Some(video.duration_seconds),
            })
            .send()
            .await
            .map_err(|e| http::transport(provider, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(provider, response).await);
        }

        let status = response.status().as_u16();
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| http::transport(provider, e))?;

        let url = Self::extract_media_url(provider, status, value)?;
        Ok(GenerationResult::video_url(provider, model, url))
    }
}

#[async_trait]
impl Adapter for OpenAiCompatibleAdapter {
    fn vendor(&self) -> &str {
        "openai-compatible"
    }

    fn kind(&self) -> MediaKind {
        self.kind
    }

    async fn invoke(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        debug!(provider, model, kind = %self.kind, "fallback adapter invoked");

        match self.kind {
            MediaKind::Text => self.invoke_text(provider, credential, model, payload).await,
            MediaKind::Image => self.invoke_image(provider, credential, model, payload).await,
            MediaKind::Voice => self.invoke_voice(provider, credential, model, payload).await,
            MediaKind::Video => self.invoke_video(provider, credential, model, payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{ImagePayload, VideoPayload};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn image_payload() -> GenerationPayload {
        GenerationPayload::Image(ImagePayload {
            prompt: "a lighthouse".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        })
    }

    #[tokio::test]
    async fn test_data_url_shape_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"url": "https://x/a.png"}]
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompatibleAdapter::with_base_url(MediaKind::Image, Client::new(), server.uri());
        let result = adapter
            .invoke("nightcafe", &ApiCredential::new("k"), "default", &image_payload())
            .await
            .expect("image result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["provider"], "nightcafe");
        assert_eq!(json["imageUrl"], "https://x/a.png");
    }

    #[tokio::test]
    async fn test_result_sample_shape_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"sample": "https://x/b.png"}
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompatibleAdapter::with_base_url(MediaKind::Image, Client::new(), server.uri());
        let result = adapter
            .invoke("ideogram", &ApiCredential::new("k"), "v2", &image_payload())
            .await
            .expect("image result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["imageUrl"], "https://x/b.png");
    }

    #[tokio::test]
    async fn test_unrecognized_shape_fails_with_vendor_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": ["https://x/c.png"]
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompatibleAdapter::with_base_url(MediaKind::Image, Client::new(), server.uri());
        let err = adapter
            .invoke("mystery", &ApiCredential::new("k"), "m1", &image_payload())
            .await
            .expect_err("unrecognized shape");

        assert!(err.to_string().contains("mystery API error"));
    }

    #[tokio::test]
    async fn test_video_fallback_uses_duration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos/generations"))
            .and(wiremock::matchers::body_partial_json(serde_json::json!({
                "duration": 5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"sample": "https://x/clip.mp4"}
            })))
            .mount(&server)
            .await;

        let adapter =
            OpenAiCompatibleAdapter::with_base_url(MediaKind::Video, Client::new(), server.uri());
        let payload = GenerationPayload::Video(VideoPayload {
            prompt: "a storm".to_string(),
            duration_seconds: 5,
        });
        let result = adapter
            .invoke("pika", &ApiCredential::new("k"), "pika-1.5", &payload)
            .await
            .expect("video result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["videoUrl"], "https://x/clip.mp4");
    }

    #[test]
    fn test_vendor_base_url_is_derived_from_provider() {
        let adapter = OpenAiCompatibleAdapter::new(MediaKind::Image, Client::new());
        assert_eq!(adapter.base_url("acme"), "https://api.acme.com/v1");
    }
}
