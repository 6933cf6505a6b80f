//! Typed responses from the gateway.

use serde::Deserialize;

/// Error body shape returned by the gateway on any failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// A text generation result.
#[derive(Debug, Clone, Deserialize)]
pub struct TextGeneration {
    /// Vendor-confirmed provider identifier.
    pub provider: String,
    /// Model that ran.
    pub model: String,
    /// The generated text.
    pub content: String,
}

/// An image generation result.
///
/// Synchronous vendors populate `image_url`; asynchronous job-style vendors
/// populate `message_id`/`status` instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGeneration {
    /// Vendor-confirmed provider identifier.
    pub provider: String,
    /// Model that ran.
    pub model: String,
    /// URL or data-URI of the generated image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Prompt rewrite reported by the vendor.
    #[serde(default)]
    pub revised_prompt: Option<String>,
    /// Job identifier from an asynchronous vendor.
    #[serde(default)]
    pub message_id: Option<String>,
    /// Job state from an asynchronous vendor.
    #[serde(default)]
    pub status: Option<String>,
}

impl ImageGeneration {
    /// Whether the vendor accepted the job without a synchronous result.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.status.as_deref() == Some("processing")
    }
}

/// A speech synthesis result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceGeneration {
    /// Vendor-confirmed provider identifier.
    pub provider: String,
    /// Model that ran.
    pub model: String,
    /// Playable audio reference (URL or data-URI).
    pub audio_url: String,
    /// Raw base64 audio payload, for vendors that deliver one.
    #[serde(default)]
    pub audio_content: Option<String>,
}

/// A video generation result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGeneration {
    /// Vendor-confirmed provider identifier.
    pub provider: String,
    /// Model that ran.
    pub model: String,
    /// URL of the generated clip, when synchronously available.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Job identifier from an asynchronous vendor.
    #[serde(default)]
    pub job_id: Option<String>,
    /// Job state from an asynchronous vendor.
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_generation_job_shape() {
        let generation: ImageGeneration = serde_json::from_value(serde_json::json!({
            "provider": "midjourney",
            "model": "midjourney",
            "messageId": "m-1",
            "status": "processing"
        }))
        .expect("deserialize");
        assert!(generation.is_processing());
        assert!(generation.image_url.is_none());
    }

    #[test]
    fn test_image_generation_url_shape() {
        let generation: ImageGeneration = serde_json::from_value(serde_json::json!({
            "provider": "openai",
            "model": "dall-e-3",
            "imageUrl": "https://x/img.png",
            "revisedPrompt": "p2"
        }))
        .expect("deserialize");
        assert!(!generation.is_processing());
        assert_eq!(generation.image_url.as_deref(), Some("https://x/img.png"));
    }
}
