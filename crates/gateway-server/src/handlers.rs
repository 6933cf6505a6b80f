//! HTTP request handlers for the gateway API.
//!
//! Each generation handler follows the same order: collect missing required
//! fields into a 400 before anything else, then hand the normalized request
//! to the dispatcher (which resolves the credential before any vendor call),
//! and serialize the flattened result.

use axum::extract::State;
use axum::Json;
use gateway_core::{
    ChatMessage, GenerationPayload, GenerationRequest, GenerationResult, ImagePayload, MediaKind,
    TextPayload, VideoPayload, VoicePayload, DEFAULT_IMAGE_QUALITY, DEFAULT_IMAGE_SIZE,
    DEFAULT_VIDEO_DURATION_SECS,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Registered providers for one media kind.
#[derive(Debug, Serialize)]
pub struct ProviderListing {
    /// The media kind.
    pub kind: MediaKind,
    /// Provider identifiers with a registered adapter. Anything else routes
    /// to the OpenAI-compatible fallback.
    pub providers: Vec<String>,
}

/// List registered providers per media kind.
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<ProviderListing>> {
    let registry = state.registry();
    let listings = [
        MediaKind::Text,
        MediaKind::Image,
        MediaKind::Voice,
        MediaKind::Video,
    ]
    .into_iter()
    .map(|kind| ProviderListing {
        kind,
        providers: registry.provider_ids(kind),
    })
    .collect();
    Json(listings)
}

/// Text generation request body.
#[derive(Debug, Deserialize)]
pub struct TextGenerationBody {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    messages: Option<Vec<ChatMessage>>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

/// Image generation request body.
#[derive(Debug, Deserialize)]
pub struct ImageGenerationBody {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    quality: Option<String>,
}

/// Voice generation request body.
#[derive(Debug, Deserialize)]
pub struct VoiceGenerationBody {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    voice: Option<String>,
}

/// Video generation request body.
#[derive(Debug, Deserialize)]
pub struct VideoGenerationBody {
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    duration: Option<u32>,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

async fn dispatch_request(
    state: &AppState,
    request: GenerationRequest,
) -> Result<Json<GenerationResult>, ApiError> {
    request.validate()?;
    let result = state.dispatcher().dispatch(&request).await?;
    Ok(Json(result))
}

/// POST /v1/generate/text
#[instrument(skip(state, body))]
pub async fn generate_text(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TextGenerationBody>,
) -> Result<Json<GenerationResult>, ApiError> {
    let mut missing = Vec::new();
    if blank(&body.provider) {
        missing.push("provider");
    }
    if blank(&body.model) {
        missing.push("model");
    }
    if body.messages.as_ref().map_or(true, |m| m.is_empty()) {
        missing.push("messages");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let request = GenerationRequest::new(
        body.provider.unwrap_or_default(),
        body.model.unwrap_or_default(),
        GenerationPayload::Text(TextPayload {
            messages: body.messages.unwrap_or_default(),
            temperature: body.temperature,
            max_tokens: body.max_tokens,
        }),
    );
    dispatch_request(&state, request).await
}

/// POST /v1/generate/image
#[instrument(skip(state, body))]
pub async fn generate_image(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ImageGenerationBody>,
) -> Result<Json<GenerationResult>, ApiError> {
    let mut missing = Vec::new();
    if blank(&body.provider) {
        missing.push("provider");
    }
    if blank(&body.model) {
        missing.push("model");
    }
    if blank(&body.prompt) {
        missing.push("prompt");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let request = GenerationRequest::new(
        body.provider.unwrap_or_default(),
        body.model.unwrap_or_default(),
        GenerationPayload::Image(ImagePayload {
            prompt: body.prompt.unwrap_or_default(),
            size: body.size.unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            quality: body
                .quality
                .unwrap_or_else(|| DEFAULT_IMAGE_QUALITY.to_string()),
        }),
    );
    dispatch_request(&state, request).await
}

/// POST /v1/generate/voice
#[instrument(skip(state, body))]
pub async fn generate_voice(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VoiceGenerationBody>,
) -> Result<Json<GenerationResult>, ApiError> {
    let mut missing = Vec::new();
    if blank(&body.provider) {
        missing.push("provider");
    }
    if blank(&body.model) {
        missing.push("model");
    }
    if blank(&body.text) {
        missing.push("text");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let request = GenerationRequest::new(
        body.provider.unwrap_or_default(),
        body.model.unwrap_or_default(),
        GenerationPayload::Voice(VoicePayload {
            text: body.text.unwrap_or_default(),
            voice: body.voice,
        }),
    );
    dispatch_request(&state, request).await
}

/// POST /v1/generate/video
#[instrument(skip(state, body))]
pub async fn generate_video(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<VideoGenerationBody>,
) -> Result<Json<GenerationResult>, ApiError> {
    let mut missing = Vec::new();
    if blank(&body.provider) {
        missing.push("provider");
    }
    if blank(&body.model) {
        missing.push("model");
    }
    if blank(&body.prompt) {
        missing.push("prompt");
    }
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let request = GenerationRequest::new(
        body.provider.unwrap_or_default(),
        body.model.unwrap_or_default(),
        GenerationPayload::Video(VideoPayload {
            prompt: body.prompt.unwrap_or_default(),
            duration_seconds: body.duration.unwrap_or(DEFAULT_VIDEO_DURATION_SECS),
        }),
    );
    dispatch_request(&state, request).await
}
