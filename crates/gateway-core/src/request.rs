//! Normalized request types for the gateway.
//!
//! This module defines the provider-agnostic request format that abstracts
//! across all vendor APIs, one payload variant per media kind.

use serde::{Deserialize, Serialize};

/// Default size applied when an image request omits one.
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Default quality tier applied when an image request omits one.
pub const DEFAULT_IMAGE_QUALITY: &str = "standard";

/// Default clip length in seconds applied when a video request omits one.
pub const DEFAULT_VIDEO_DURATION_SECS: u32 = 5;

/// The media kind a generation request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Chat/text generation
    Text,
    /// Image generation
    Image,
    /// Speech synthesis
    Voice,
    /// Video generation
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
            Self::Voice => write!(f, "voice"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Normalized generation request handed to the dispatcher.
///
/// `provider` selects the adapter and credential; `model` is passed to the
/// vendor verbatim. Both are required and validated non-empty before
/// dispatch, together with the payload's mandatory field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Provider identifier (e.g. "openai", "elevenlabs"). Matched
    /// case-insensitively against the adapter registry.
    pub provider: String,

    /// Vendor model identifier (e.g. "dall-e-3", "eleven_multilingual_v2").
    pub model: String,

    /// Kind-specific request payload.
    #[serde(flatten)]
    pub payload: GenerationPayload,
}

impl GenerationRequest {
    /// Create a new request.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        payload: GenerationPayload,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            payload,
        }
    }

    /// The media kind this request targets.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.payload.kind()
    }

    /// Validate that `provider`, `model`, and the kind-specific mandatory
    /// field are present and non-empty.
    ///
    /// # Errors
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> Result<(), crate::error::GatewayError> {
        if self.provider.trim().is_empty() {
            return Err(crate::error::GatewayError::validation(
                "provider is required",
                "provider",
            ));
        }

        if self.model.trim().is_empty() {
            return Err(crate::error::GatewayError::validation(
                "model is required",
                "model",
            ));
        }

        match &self.payload {
            GenerationPayload::Text(text) => {
                if text.messages.is_empty() {
                    return Err(crate::error::GatewayError::validation(
                        "messages cannot be empty",
                        "messages",
                    ));
                }
            }
            GenerationPayload::Image(image) => {
                if image.prompt.trim().is_empty() {
                    return Err(crate::error::GatewayError::validation(
                        "prompt is required",
                        "prompt",
                    ));
                }
            }
            GenerationPayload::Voice(voice) => {
                if voice.text.trim().is_empty() {
                    return Err(crate::error::GatewayError::validation(
                        "text is required",
                        "text",
                    ));
                }
            }
            GenerationPayload::Video(video) => {
                if video.prompt.trim().is_empty() {
                    return Err(crate::error::GatewayError::validation(
                        "prompt is required",
                        "prompt",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Kind-specific payload of a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationPayload {
    /// Chat/text generation payload
    Text(TextPayload),
    /// Image generation payload
    Image(ImagePayload),
    /// Speech synthesis payload
    Voice(VoicePayload),
    /// Video generation payload
    Video(VideoPayload),
}

impl GenerationPayload {
    /// The media kind of this payload.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Text(_) => MediaKind::Text,
            Self::Image(_) => MediaKind::Image,
            Self::Voice(_) => MediaKind::Voice,
            Self::Video(_) => MediaKind::Video,
        }
    }

    /// Borrow the text payload, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextPayload> {
        match self {
            Self::Text(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow the image payload, if this is one.
    #[must_use]
    pub fn as_image(&self) -> Option<&ImagePayload> {
        match self {
            Self::Image(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow the voice payload, if this is one.
    #[must_use]
    pub fn as_voice(&self) -> Option<&VoicePayload> {
        match self {
            Self::Voice(p) => Some(p),
            _ => None,
        }
    }

    /// Borrow the video payload, if this is one.
    #[must_use]
    pub fn as_video(&self) -> Option<&VideoPayload> {
        match self {
            Self::Video(p) => Some(p),
            _ => None,
        }
    }
}

/// Payload for chat/text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPayload {
    /// Conversation messages, oldest first.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Payload for image generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Text prompt describing the image.
    pub prompt: String,

    /// Image size in "WIDTHxHEIGHT" form.
    pub size: String,

    /// Quality tier ("standard", "hd", ...), interpreted per vendor.
    pub quality: String,
}

/// Payload for speech synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicePayload {
    /// Text to synthesize.
    pub text: String,

    /// Vendor voice identifier. Each vendor supplies its own default when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Payload for video generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoPayload {
    /// Text prompt describing the clip.
    pub prompt: String,

    /// Requested clip length in seconds.
    pub duration_seconds: u32,
}

/// Chat message with role and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author.
    pub role: MessageRole,

    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_request(provider: &str, model: &str, prompt: &str) -> GenerationRequest {
        GenerationRequest::new(
            provider,
            model,
            GenerationPayload::Image(ImagePayload {
                prompt: prompt.to_string(),
                size: DEFAULT_IMAGE_SIZE.to_string(),
                quality: DEFAULT_IMAGE_QUALITY.to_string(),
            }),
        )
    }

    #[test]
    fn test_valid_image_request() {
        let request = image_request("openai", "dall-e-3", "a lighthouse at dusk");
        assert!(request.validate().is_ok());
        assert_eq!(request.kind(), MediaKind::Image);
    }

    #[test]
    fn test_empty_provider_rejected() {
        let request = image_request("", "dall-e-3", "a lighthouse");
        let err = request.validate().expect_err("empty provider");
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_empty_model_rejected() {
        let request = image_request("openai", "  ", "a lighthouse");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let request = image_request("openai", "dall-e-3", "   ");
        let err = request.validate().expect_err("blank prompt");
        assert!(err.to_string().contains("prompt"));
    }

    #[test]
    fn test_empty_messages_rejected() {
        let request = GenerationRequest::new(
            "openai",
            "gpt-4o",
            GenerationPayload::Text(TextPayload {
                messages: vec![],
                temperature: None,
                max_tokens: None,
            }),
        );
        let err = request.validate().expect_err("no messages");
        assert!(err.to_string().contains("messages"));
    }

    #[test]
    fn test_voice_without_identifier_is_valid() {
        let request = GenerationRequest::new(
            "elevenlabs",
            "eleven_multilingual_v2",
            GenerationPayload::Voice(VoicePayload {
                text: "hello there".to_string(),
                voice: None,
            }),
        );
        assert!(request.validate().is_ok());
        assert_eq!(request.kind(), MediaKind::Voice);
    }

    #[test]
    fn test_chat_message_constructors() {
        assert!(matches!(ChatMessage::system("be brief").role, MessageRole::System));
        assert!(matches!(ChatMessage::user("hi").role, MessageRole::User));
        assert!(matches!(ChatMessage::assistant("hello").role, MessageRole::Assistant));
    }

    #[test]
    fn test_payload_accessors() {
        let payload = GenerationPayload::Video(VideoPayload {
            prompt: "waves".to_string(),
            duration_seconds: DEFAULT_VIDEO_DURATION_SECS,
        });
        assert!(payload.as_video().is_some());
        assert!(payload.as_image().is_none());
        assert_eq!(payload.kind(), MediaKind::Video);
    }
}
