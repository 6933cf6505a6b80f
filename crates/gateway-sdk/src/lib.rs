//! # Gateway SDK
//!
//! Typed client for the AI Media Gateway, one entry point per media kind.
//!
//! This is intentionally a thin pass-through: each call fills in documented
//! defaults, posts to the matching gateway endpoint, and either returns the
//! primary artifact or raises an error built from the gateway's `{error}`
//! body. No retries, no caching.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_sdk::{Client, ImageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gateway_sdk::Error> {
//!     let client = Client::builder()
//!         .base_url("http://localhost:8080")
//!         .build()?;
//!
//!     let image = client
//!         .generate_image(&ImageRequest::new("openai", "dall-e-3", "a lighthouse"))
//!         .await?;
//!
//!     println!("{:?}", image.image_url);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

// Re-export main types
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use request::{ImageRequest, TextRequest, VideoRequest, VoiceRequest};
pub use response::{ImageGeneration, TextGeneration, VideoGeneration, VoiceGeneration};

// Re-export the message types callers build conversations from.
pub use gateway_core::{ChatMessage, MessageRole};
