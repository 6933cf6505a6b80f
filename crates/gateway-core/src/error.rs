//! Error types for the gateway.
//!
//! One taxonomy covers every layer: adapters raise `Vendor`/`Transport`
//! errors, the dispatcher raises `Credential`, and the HTTP boundary raises
//! `Validation`. The server is the only place errors become HTTP responses.

use crate::request::MediaKind;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Errors produced by the gateway core.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A required request field is missing or empty.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the validation failure.
        message: String,
        /// The field that failed validation, when attributable.
        field: Option<String>,
    },

    /// No credential could be resolved for the requested provider.
    #[error("API key not configured for {provider}")]
    Credential {
        /// The provider identifier the lookup was performed for.
        provider: String,
    },

    /// The upstream vendor returned a non-success HTTP status.
    ///
    /// The message embeds the vendor's raw error body; callers never need to
    /// understand vendor-specific error formats.
    #[error("{vendor} API error: {body}")]
    Vendor {
        /// Canonical vendor name.
        vendor: String,
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body, read as text.
        body: String,
    },

    /// The upstream call could not be completed (DNS failure, timeout,
    /// connection reset).
    #[error("{vendor} request failed: {message}")]
    Transport {
        /// Canonical vendor name.
        vendor: String,
        /// Description of the transport failure.
        message: String,
    },

    /// An adapter received a payload for a different media kind.
    ///
    /// The registry keys adapters by kind, so this only fires on misuse of
    /// the adapter API itself.
    #[error("{vendor} adapter expected a {expected} payload")]
    UnexpectedPayload {
        /// Canonical vendor name.
        vendor: String,
        /// The media kind the adapter handles.
        expected: MediaKind,
    },
}

impl GatewayError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a credential error for a provider.
    pub fn credential(provider: impl Into<String>) -> Self {
        Self::Credential {
            provider: provider.into(),
        }
    }

    /// Create a vendor error from an upstream status and body.
    pub fn vendor(vendor: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Vendor {
            vendor: vendor.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(vendor: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transport {
            vendor: vendor.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected-payload error.
    pub fn unexpected_payload(vendor: impl Into<String>, expected: MediaKind) -> Self {
        Self::UnexpectedPayload {
            vendor: vendor.into(),
            expected,
        }
    }

    /// The HTTP status class this error maps to at the gateway boundary.
    ///
    /// Vendor and transport failures are indistinguishable in the response
    /// contract: both surface as 500 regardless of the upstream status.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Credential { .. } => 401,
            Self::Vendor { .. } | Self::Transport { .. } | Self::UnexpectedPayload { .. } => 500,
        }
    }

    /// The upstream HTTP status, when the upstream responded at all.
    #[must_use]
    pub fn source_status(&self) -> Option<u16> {
        match self {
            Self::Vendor { status, .. } => Some(*status),
            _ => None,
        }
    }
}
