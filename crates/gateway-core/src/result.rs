//! Normalized result types returned by adapters.
//!
//! Every adapter constructs a fully-populated variant through one of the
//! explicit constructors below; no adapter returns a partially-filled result.
//! The struct serializes flattened so the HTTP body is
//! `{"provider": ..., "model": ..., "imageUrl": ...}` rather than nesting the
//! artifact under a separate key.

use serde::{Deserialize, Serialize};

/// Normalized result of one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Vendor-confirmed provider identifier. May differ from the request's
    /// provider alias when an alias routed to a canonical vendor.
    pub provider: String,

    /// Model the vendor ran.
    pub model: String,

    /// The generated artifact.
    #[serde(flatten)]
    pub output: GenerationOutput,
}

impl GenerationResult {
    /// Construct a text result.
    #[must_use]
    pub fn text(
        provider: impl Into<String>,
        model: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Text(TextOutput {
                content: content.into(),
            }),
        }
    }

    /// Construct an image result referencing a generated image.
    #[must_use]
    pub fn image_url(
        provider: impl Into<String>,
        model: impl Into<String>,
        image_url: impl Into<String>,
        revised_prompt: Option<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Image(ImageOutput::Url {
                image_url: image_url.into(),
                revised_prompt,
            }),
        }
    }

    /// Construct an image result for an asynchronous job-style vendor.
    ///
    /// The job is surfaced as-is; this layer never polls for completion.
    #[must_use]
    pub fn image_job(
        provider: impl Into<String>,
        model: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Image(ImageOutput::Job {
                message_id: message_id.into(),
                status: JobStatus::Processing,
            }),
        }
    }

    /// Construct an audio result from a playable reference.
    #[must_use]
    pub fn audio(
        provider: impl Into<String>,
        model: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Audio(AudioOutput {
                audio_url: audio_url.into(),
                audio_content: None,
            }),
        }
    }

    /// Construct an audio result that also carries the vendor's raw base64
    /// payload as secondary metadata.
    #[must_use]
    pub fn audio_with_content(
        provider: impl Into<String>,
        model: impl Into<String>,
        audio_url: impl Into<String>,
        audio_content: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Audio(AudioOutput {
                audio_url: audio_url.into(),
                audio_content: Some(audio_content.into()),
            }),
        }
    }

    /// Construct a video result referencing a finished clip.
    #[must_use]
    pub fn video_url(
        provider: impl Into<String>,
        model: impl Into<String>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Video(VideoOutput::Url {
                video_url: video_url.into(),
            }),
        }
    }

    /// Construct a video result for an asynchronous job-style vendor.
    #[must_use]
    pub fn video_job(
        provider: impl Into<String>,
        model: impl Into<String>,
        job_id: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            output: GenerationOutput::Video(VideoOutput::Job {
                job_id: job_id.into(),
                status: JobStatus::Processing,
            }),
        }
    }
}

/// Generated artifact, one tagged variant per media kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    /// Text content
    Text(TextOutput),
    /// Image reference or pending job
    Image(ImageOutput),
    /// Playable audio reference
    Audio(AudioOutput),
    /// Video reference or pending job
    Video(VideoOutput),
}

/// Text artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextOutput {
    /// The generated text.
    pub content: String,
}

/// Image artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageOutput {
    /// A retrievable image reference.
    #[serde(rename_all = "camelCase")]
    Url {
        /// URL or data-URI of the generated image.
        image_url: String,
        /// Prompt rewrite reported by the vendor, when present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        revised_prompt: Option<String>,
    },
    /// A job accepted by an asynchronous vendor; not yet retrievable.
    #[serde(rename_all = "camelCase")]
    Job {
        /// Vendor job identifier for the caller's own follow-up.
        message_id: String,
        /// Job state as reported by the vendor.
        status: JobStatus,
    },
}

/// Audio artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioOutput {
    /// Playable audio reference (URL or data-URI).
    pub audio_url: String,

    /// Raw base64 audio payload, for vendors that deliver one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_content: Option<String>,
}

/// Video artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoOutput {
    /// A retrievable video reference.
    #[serde(rename_all = "camelCase")]
    Url {
        /// URL of the generated clip.
        video_url: String,
    },
    /// A job accepted by an asynchronous vendor.
    #[serde(rename_all = "camelCase")]
    Job {
        /// Vendor job identifier.
        job_id: String,
        /// Job state as reported by the vendor.
        status: JobStatus,
    },
}

/// State of an asynchronous vendor job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// The vendor accepted the job and is still generating.
    Processing,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
        }
    }
}
