//! OpenAI-compatible chat backend.
//!
//! Works with GLM/Zhipu, OpenAI, OpenRouter, Ollama, and any endpoint that
//! exposes an OpenAI-compatible `/chat/completions` route. The economy tier
//! uses this with GLM's endpoint by default.

use async_trait::async_trait;
use serde::Deserialize;
use tierbot_core::backend::{ChatBackend, ChatCompletion, ChatUsage};
use tierbot_core::error::BackendError;
use tracing::{debug, warn};

/// GLM's OpenAI-compatible endpoint (economy default).
pub const GLM_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// An OpenAI-compatible chat backend bound to one model.
pub struct OpenAiCompatBackend {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Create a GLM backend (convenience constructor).
    pub fn glm(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new("glm", GLM_BASE_URL, api_key, model)
    }
}

#[async_trait]
impl ChatBackend for OpenAiCompatBackend {
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
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
        });

        debug!(backend = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            return Err(BackendError::AuthenticationFailed(format!(
                "Invalid API key for backend '{}'",
                self.name
            )));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(backend = %self.name, status, body = %error_body, "API error");
            return Err(BackendError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ApiResponse = response.json().await.map_err(|e| BackendError::ApiError {
            status_code: 200,
            message: format!("Failed to parse response: {e}"),
        })?;

        self.to_completion(api_resp)
    }
}

impl OpenAiCompatBackend {
    fn to_completion(&self, resp: ApiResponse) -> Result<ChatCompletion, BackendError> {
        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BackendError::EmptyCompletion(self.name.clone()));
        }

        Ok(ChatCompletion {
            text,
            usage: resp.usage.map(|u| ChatUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
            model: resp.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}

// --- API types ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let backend = OpenAiCompatBackend::new("glm", "https://example.com/v1/", "key", "m");
        assert_eq!(backend.base_url, "https://example.com/v1");
        assert_eq!(backend.name(), "glm");
        assert_eq!(backend.model(), "m");
    }

    #[test]
    fn glm_constructor_uses_default_endpoint() {
        let backend = OpenAiCompatBackend::glm("key", "glm-4-flash");
        assert_eq!(backend.base_url, GLM_BASE_URL);
        assert_eq!(backend.model(), "glm-4-flash");
    }

    #[test]
    fn parse_completion_response() {
        let backend = OpenAiCompatBackend::glm("key", "glm-4-flash");
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "- insight one"}}],
                "usage": {"prompt_tokens": 20, "completion_tokens": 8, "total_tokens": 28},
                "model": "glm-4-flash"
            }"#,
        )
        .unwrap();

        let completion = backend.to_completion(resp).unwrap();
        assert_eq!(completion.text, "- insight one");
        assert_eq!(completion.usage.unwrap().total_tokens(), 28);
        assert_eq!(completion.model, "glm-4-flash");
    }

    #[test]
    fn empty_choices_is_empty_completion() {
        let backend = OpenAiCompatBackend::glm("key", "glm-4-flash");
        let resp: ApiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result = backend.to_completion(resp);
        assert!(matches!(result, Err(BackendError::EmptyCompletion(_))));
    }

    #[test]
    fn missing_usage_is_tolerated() {
        let backend = OpenAiCompatBackend::glm("key", "glm-4-flash");
        let resp: ApiResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "text"}}]}"#,
        )
        .unwrap();
        let completion = backend.to_completion(resp).unwrap();
        assert!(completion.usage.is_none());
        // Falls back to the configured model name
        assert_eq!(completion.model, "glm-4-flash");
    }
}
