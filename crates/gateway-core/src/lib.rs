//! # Gateway Core
//!
//! Core types, traits, and error handling for the AI Media Gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - Normalized generation request and result types
//! - The vendor adapter trait
//! - The credential resolution capability
//! - Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod credentials;
pub mod error;
pub mod request;
pub mod result;

// Re-export commonly used types
pub use adapter::Adapter;
pub use credentials::{
    ApiCredential, CredentialResolver, EnvCredentialResolver, StaticCredentialResolver,
};
pub use error::{GatewayError, GatewayResult};
pub use request::{
    ChatMessage, GenerationPayload, GenerationRequest, ImagePayload, MediaKind, MessageRole,
    TextPayload, VideoPayload, VoicePayload, DEFAULT_IMAGE_QUALITY, DEFAULT_IMAGE_SIZE,
    DEFAULT_VIDEO_DURATION_SECS,
};
pub use result::{
    AudioOutput, GenerationOutput, GenerationResult, ImageOutput, JobStatus, TextOutput,
    VideoOutput,
};
