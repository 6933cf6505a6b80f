//! # Gateway Adapters
//!
//! Vendor adapter implementations for the AI Media Gateway.
//!
//! One module per vendor:
//! - OpenAI (chat, DALL-E images, speech)
//! - Anthropic (Claude chat)
//! - Google (Gemini chat, Cloud Text-to-Speech)
//! - Stability AI (binary image generation)
//! - Midjourney via relay API (asynchronous image jobs)
//! - ElevenLabs (speech)
//! - Luma Dream Machine (video jobs)
//! - A generic OpenAI-compatible fallback for unregistered providers
//!
//! The [`AdapterRegistry`] maps provider identifiers to adapters per media
//! kind, with exactly one fallback per kind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod anthropic;
pub mod elevenlabs;
pub mod fallback;
pub mod google;
mod http;
pub mod luma;
pub mod midjourney;
pub mod openai;
pub mod registry;
pub mod stability;

// Re-export main types
pub use anthropic::AnthropicChatAdapter;
pub use elevenlabs::ElevenLabsSpeechAdapter;
pub use fallback::OpenAiCompatibleAdapter;
pub use google::{GeminiChatAdapter, GoogleSpeechAdapter};
pub use luma::LumaVideoAdapter;
pub use midjourney::MidjourneyImageAdapter;
pub use openai::{OpenAiChatAdapter, OpenAiImageAdapter, OpenAiSpeechAdapter};
pub use registry::{AdapterRegistry, AdapterRegistryBuilder};
pub use stability::StabilityImageAdapter;
