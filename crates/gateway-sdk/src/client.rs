//! HTTP client for the Gateway SDK.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{ImageRequest, TextRequest, VideoRequest, VoiceRequest, DEFAULT_TEMPERATURE};
use crate::response::{
    ErrorBody, ImageGeneration, TextGeneration, VideoGeneration, VoiceGeneration,
};
use gateway_core::{DEFAULT_IMAGE_QUALITY, DEFAULT_IMAGE_SIZE, DEFAULT_VIDEO_DURATION_SECS};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for the AI Media Gateway.
#[derive(Clone)]
pub struct Client {
    /// HTTP client.
    http: reqwest::Client,
    /// Client configuration.
    config: Arc<ClientConfig>,
}

impl Client {
    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::configuration(format!("Invalid user agent: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a chat completion and return the generated text.
    ///
    /// Temperature defaults to a conversational value when unset.
    #[instrument(skip(self, request), fields(provider = %request.provider, model = %request.model))]
    pub async fn call_llm(&self, request: &TextRequest) -> Result<String> {
        let body = json!({
            "provider": request.provider,
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "max_tokens": request.max_tokens,
        });
        let generation: TextGeneration = self.post_json("/v1/generate/text", &body).await?;
        Ok(generation.content)
    }

    /// Generate an image.
    ///
    /// Size defaults to the standard square and quality to the standard
    /// tier. The result carries either an image reference or a job
    /// identifier, depending on the vendor.
    #[instrument(skip(self, request), fields(provider = %request.provider, model = %request.model))]
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImageGeneration> {
        let body = json!({
            "provider": request.provider,
            "model": request.model,
            "prompt": request.prompt,
            "size": request.size.as_deref().unwrap_or(DEFAULT_IMAGE_SIZE),
            "quality": request.quality.as_deref().unwrap_or(DEFAULT_IMAGE_QUALITY),
        });
        self.post_json("/v1/generate/image", &body).await
    }

    /// Synthesize speech and return the playable audio reference.
    #[instrument(skip(self, request), fields(provider = %request.provider, model = %request.model))]
    pub async fn generate_voice(&self, request: &VoiceRequest) -> Result<String> {
        let body = json!({
            "provider": request.provider,
            "model": request.model,
            "text": request.text,
            "voice": request.voice,
        });
        let generation: VoiceGeneration = self.post_json("/v1/generate/voice", &body).await?;
        Ok(generation.audio_url)
    }

    /// Generate a video.
    ///
    /// Duration defaults to a short clip length.
    #[instrument(skip(self, request), fields(provider = %request.provider, model = %request.model))]
    pub async fn generate_video(&self, request: &VideoRequest) -> Result<VideoGeneration> {
        let body = json!({
            "provider": request.provider,
            "model": request.model,
            "prompt": request.prompt,
            "duration": request
                .duration_seconds
                .unwrap_or(DEFAULT_VIDEO_DURATION_SECS),
        });
        self.post_json("/v1/generate/video", &body).await
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("Invalid request path: {e}")))?;

        debug!(%url, "posting generation request");

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("request failed with status {status}"));
            return Err(Error::api(status.as_u16(), message));
        }

        response.json().await.map_err(|e| Error::parse(e.to_string()))
    }
}

/// Builder for [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gateway base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let mut config = ClientConfig::default();
        if let Some(base_url) = self.base_url {
            config.base_url = Url::parse(&base_url)
                .map_err(|e| Error::configuration(format!("Invalid base URL: {e}")))?;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        Client::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::VoiceRequest;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> Client {
        Client::builder()
            .base_url(server.uri())
            .build()
            .expect("client")
    }

    #[tokio::test]
    async fn test_call_llm_applies_temperature_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/generate/text"))
            .and(body_partial_json(serde_json::json!({"temperature": 0.7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "provider": "openai",
                "model": "gpt-4o",
                "content": "hello"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let content = client
            .call_llm(&TextRequest::prompt("openai", "gpt-4o", "hi"))
            .await
            .expect("content");
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_generate_image_applies_size_and_quality_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/generate/image"))
            .and(body_partial_json(serde_json::json!({
                "size": "1024x1024",
                "quality": "standard"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "provider": "openai",
                "model": "dall-e-3",
                "imageUrl": "https://x/img.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let image = client
            .generate_image(&ImageRequest::new("openai", "dall-e-3", "a fox"))
            .await
            .expect("image");
        assert_eq!(image.image_url.as_deref(), Some("https://x/img.png"));
        assert!(!image.is_processing());
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/generate/voice"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "API key not configured for elevenlabs"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_voice(&VoiceRequest::new("elevenlabs", "eleven_multilingual_v2", "hi"))
            .await
            .expect_err("api error");

        assert_eq!(err.status_code(), Some(401));
        assert!(err
            .to_string()
            .contains("API key not configured for elevenlabs"));
    }

    #[tokio::test]
    async fn test_generate_video_applies_duration_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/generate/video"))
            .and(body_partial_json(serde_json::json!({"duration": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "provider": "luma",
                "model": "ray-2",
                "jobId": "gen-7",
                "status": "processing"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let video = client
            .generate_video(&VideoRequest::new("luma", "ray-2", "waves"))
            .await
            .expect("video");
        assert_eq!(video.job_id.as_deref(), Some("gen-7"));
        assert!(video.video_url.is_none());
    }
}
