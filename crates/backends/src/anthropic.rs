//! Anthropic native backend (premium tier).
//!
//! Uses the Messages API directly: `x-api-key` header authentication (not
//! Bearer) plus the `anthropic-version` header. Responses arrive as content
//! blocks; text blocks are concatenated into the completion.

use async_trait::async_trait;
use serde::Deserialize;
use tierbot_core::backend::{ChatBackend, ChatCompletion, ChatUsage};
use tierbot_core::error::BackendError;
use tracing::{debug, warn};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic Messages API backend bound to one model.
pub struct AnthropicBackend {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "anthropic".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatBackend for AnthropicBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<ChatCompletion, BackendError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        debug!(backend = "anthropic", model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(e.to_string())
                } else {
                    BackendError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(BackendError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(BackendError::AuthenticationFailed(
                "Invalid Anthropic API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Anthropic API error");
            return Err(BackendError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: MessagesResponse =
            response.json().await.map_err(|e| BackendError::ApiError {
                status_code: 200,
                message: format!("Failed to parse Anthropic response: {e}"),
            })?;

        self.to_completion(api_resp)
    }
}

impl AnthropicBackend {
    fn to_completion(&self, resp: MessagesResponse) -> Result<ChatCompletion, BackendError> {
        let mut text = String::new();
        for block in &resp.content {
            if let ResponseContentBlock::Text { text: t } = block {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(t);
            }
        }

        if text.is_empty() {
            return Err(BackendError::EmptyCompletion(self.name.clone()));
        }

        Ok(ChatCompletion {
            text,
            usage: Some(ChatUsage {
                prompt_tokens: resp.usage.input_tokens,
                completion_tokens: resp.usage.output_tokens,
            }),
            model: resp.model,
        })
    }
}

// --- Anthropic API types ---

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ResponseContentBlock>,
    usage: MessagesUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let backend = AnthropicBackend::new("sk-ant-test", "claude-sonnet-4-20250514");
        assert_eq!(backend.name(), "anthropic");
        assert_eq!(backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(backend.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn constructor_with_base_url() {
        let backend = AnthropicBackend::new("sk-ant-test", "m")
            .with_base_url("https://custom.proxy.com/");
        assert_eq!(backend.base_url, "https://custom.proxy.com");
    }

    #[test]
    fn parse_text_response() {
        let backend = AnthropicBackend::new("key", "claude-sonnet-4-20250514");
        let resp: MessagesResponse = serde_json::from_str(
            r##"{
                "id": "msg_01",
                "model": "claude-sonnet-4-20250514",
                "content": [{"type": "text", "text": "# USER PROFILE"}],
                "usage": {"input_tokens": 900, "output_tokens": 1200}
            }"##,
        )
        .unwrap();

        let completion = backend.to_completion(resp).unwrap();
        assert_eq!(completion.text, "# USER PROFILE");
        let usage = completion.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 900);
        assert_eq!(usage.completion_tokens, 1200);
    }

    #[test]
    fn multiple_text_blocks_joined() {
        let backend = AnthropicBackend::new("key", "m");
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "model": "m",
                "content": [
                    {"type": "text", "text": "part one"},
                    {"type": "text", "text": "part two"}
                ],
                "usage": {"input_tokens": 1, "output_tokens": 2}
            }"#,
        )
        .unwrap();
        let completion = backend.to_completion(resp).unwrap();
        assert_eq!(completion.text, "part one\npart two");
    }

    #[test]
    fn unknown_blocks_skipped() {
        let backend = AnthropicBackend::new("key", "m");
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "model": "m",
                "content": [
                    {"type": "thinking", "thinking": "hmm"},
                    {"type": "text", "text": "answer"}
                ],
                "usage": {"input_tokens": 1, "output_tokens": 2}
            }"#,
        )
        .unwrap();
        let completion = backend.to_completion(resp).unwrap();
        assert_eq!(completion.text, "answer");
    }

    #[test]
    fn empty_content_is_error() {
        let backend = AnthropicBackend::new("key", "m");
        let resp: MessagesResponse = serde_json::from_str(
            r#"{"model": "m", "content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#,
        )
        .unwrap();
        assert!(matches!(
            backend.to_completion(resp),
            Err(BackendError::EmptyCompletion(_))
        ));
    }
}
