//! # Gateway Server
//!
//! HTTP server for the AI Media Gateway.
//!
//! This crate provides:
//! - Axum-based HTTP server with one generation endpoint per media kind
//! - Request validation and credential resolution
//! - The single error-to-response translation point
//! - Permissive cross-origin handling, including preflight

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use server::Server;
pub use state::AppState;
