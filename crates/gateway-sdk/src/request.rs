//! Typed requests for each media kind.

use gateway_core::ChatMessage;

/// Default sampling temperature for conversational calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A chat/text generation request.
#[derive(Debug, Clone)]
pub struct TextRequest {
    /// Provider identifier.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Conversation messages, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature; defaults to [`DEFAULT_TEMPERATURE`].
    pub temperature: Option<f32>,
    /// Maximum tokens to generate; vendor default when absent.
    pub max_tokens: Option<u32>,
}

impl TextRequest {
    /// Create a request from a message list.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a single-user-message request.
    #[must_use]
    pub fn prompt(
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self::new(provider, model, vec![ChatMessage::user(prompt)])
    }

    /// Override the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the generated tokens.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// An image generation request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    /// Provider identifier.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Image size; defaults to the standard square.
    pub size: Option<String>,
    /// Quality tier; defaults to the standard tier.
    pub quality: Option<String>,
}

impl ImageRequest {
    /// Create a request from a prompt.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt: prompt.into(),
            size: None,
            quality: None,
        }
    }

    /// Override the image size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Override the quality tier.
    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }
}

/// A speech synthesis request.
#[derive(Debug, Clone)]
pub struct VoiceRequest {
    /// Provider identifier.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Text to synthesize.
    pub text: String,
    /// Vendor voice identifier; the vendor's default voice when absent.
    pub voice: Option<String>,
}

impl VoiceRequest {
    /// Create a request from text.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            text: text.into(),
            voice: None,
        }
    }

    /// Pick a specific voice.
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

/// A video generation request.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    /// Provider identifier.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Clip length in seconds; defaults to a short clip.
    pub duration_seconds: Option<u32>,
}

impl VideoRequest {
    /// Create a request from a prompt.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt: prompt.into(),
            duration_seconds: None,
        }
    }

    /// Override the clip length.
    #[must_use]
    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }
}
