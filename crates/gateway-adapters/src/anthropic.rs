//! Anthropic Claude chat adapter.
//!
//! Auth is `x-api-key` plus a pinned `anthropic-version` header. The
//! messages API keeps the system prompt outside the message list and
//! requires `max_tokens`, so both are normalized here.

use async_trait::async_trait;
use gateway_core::{
    Adapter, ApiCredential, GatewayError, GatewayResult, GenerationPayload, GenerationResult,
    MediaKind, MessageRole,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

const VENDOR: &str = "Anthropic";
const PROVIDER: &str = "anthropic";
const BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

// The messages API rejects requests without an explicit token budget.
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Claude messages adapter.
pub struct AnthropicChatAdapter {
    client: Client,
    base_url: String,
}

impl AnthropicChatAdapter {
    /// Create an adapter targeting the production API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create an adapter targeting a custom base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Adapter for AnthropicChatAdapter {
    fn vendor(&self) -> &str {
        VENDOR
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Text
    }

    async fn invoke(
        &self,
        _provider: &str,
        credential: &ApiCredential,
        model: &str,
        payload: &GenerationPayload,
    ) -> GatewayResult<GenerationResult> {
        let text = payload
            .as_text()
            .ok_or_else(|| GatewayError::unexpected_payload(VENDOR, MediaKind::Text))?;

        // System messages move to the dedicated field; the rest keep order.
        let mut system: Option<String> = None;
        let mut messages = Vec::with_capacity(text.messages.len());
        for message in &text.messages {
            match message.role {
                MessageRole::System => {
                    system = Some(match system.take() {
                        Some(existing) => format!("{existing}\n{}", message.content),
                        None => message.content.clone(),
                    });
                }
                MessageRole::User => messages.push(WireMessage {
                    role: "user",
                    content: message.content.clone(),
                }),
                MessageRole::Assistant => messages.push(WireMessage {
                    role: "assistant",
                    content: message.content.clone(),
                }),
            }
        }

        debug!(model, messages = messages.len(), "Anthropic messages request");

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", credential.expose())
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model,
                max_tokens: text.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
                messages,
                system,
                temperature: text.temperature,
            })
            .send()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        if !response.status().is_success() {
            return Err(http::vendor_error(VENDOR, response).await);
        }

        let status = response.status().as_u16();
        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| http::transport(VENDOR, e))?;

        let content = parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| GatewayError::vendor(VENDOR, status, "response contained no text"))?;

        Ok(GenerationResult::text(PROVIDER, model, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{ChatMessage, TextPayload};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> GenerationPayload {
        GenerationPayload::Text(TextPayload {
            messages: vec![
                ChatMessage::system("be terse"),
                ChatMessage::user("hello"),
            ],
            temperature: None,
            max_tokens: None,
        })
    }

    #[tokio::test]
    async fn test_system_prompt_is_split_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({
                "system": "be terse",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": DEFAULT_MAX_TOKENS,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "hi"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = AnthropicChatAdapter::with_base_url(Client::new(), server.uri());
        let result = adapter
            .invoke(
                "anthropic",
                &ApiCredential::new("sk-ant-test"),
                "claude-sonnet-4-20250514",
                &payload(),
            )
            .await
            .expect("chat result");

        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["provider"], "anthropic");
        assert_eq!(json["content"], "hi");
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let adapter = AnthropicChatAdapter::with_base_url(Client::new(), server.uri());
        let err = adapter
            .invoke(
                "anthropic",
                &ApiCredential::new("sk-ant-test"),
                "claude-sonnet-4-20250514",
                &payload(),
            )
            .await
            .expect_err("vendor error");

        let message = err.to_string();
        assert!(message.contains("Anthropic API error"));
        assert!(message.contains("overloaded"));
    }
}
