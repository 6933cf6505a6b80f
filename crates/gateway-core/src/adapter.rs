//! The vendor adapter trait.
//!
//! One implementation per vendor endpoint. An adapter knows a single vendor's
//! URL, auth header, request payload shape, and response shape; it converts a
//! normalized payload into a vendor call and the vendor response into a
//! normalized result. Adding a vendor never touches the dispatcher.

use crate::credentials::ApiCredential;
use crate::error::GatewayResult;
use crate::request::{GenerationPayload, MediaKind};
use crate::result::GenerationResult;
use async_trait::async_trait;

/// A translation layer between the normalized request/result shape and one
/// vendor's native API contract.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Canonical vendor name, used in error messages.
    fn vendor(&self) -> &str;

    /// The media kind this adapter produces.
    fn kind(&self) -> MediaKind;

    /// Perform one vendor call.
    ///
    /// `provider` is the lower-cased identifier from the request. Named
    /// adapters ignore it and report their canonical identifier; the generic
    /// fallback uses it to compute a vendor-specific base URL and echoes it
    /// back in the result.
    ///
    /// # Errors
    /// `Vendor` when the upstream returns a non-success status, `Transport`
    /// when the call cannot be completed at all.
    async fn invoke(
        &self,
        provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult>;
}
