//! Shared HTTP plumbing for adapters.
//!
//! Every adapter funnels upstream failures through these helpers so the
//! dispatcher and server never see vendor-specific error formats.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use gateway_core::GatewayError;

/// Convert a non-success upstream response into a vendor error carrying the
/// body as text.
pub(crate) async fn vendor_error(vendor: &str, response: reqwest::Response) -> GatewayError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    GatewayError::vendor(vendor, status, body)
}

/// Map a request that never completed (DNS, timeout, reset) to a transport
/// error.
pub(crate) fn transport(vendor: &str, err: reqwest::Error) -> GatewayError {
    GatewayError::transport(vendor, err)
}

/// Build an addressable data-URI reference for binary artifact bytes.
pub(crate) fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Build an audio data-URI from an already-base64 payload.
pub(crate) fn audio_data_uri(base64_content: &str) -> String {
    format!("data:audio/mp3;base64,{base64_content}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_encodes_bytes() {
        assert_eq!(data_uri("image/png", b"ABC"), "data:image/png;base64,QUJD");
    }

    #[test]
    fn test_audio_data_uri_passes_base64_through() {
        assert_eq!(audio_data_uri("QUJD"), "data:audio/mp3;base64,QUJD");
    }
}
