//! ChatBackend trait — the abstraction over model backends.
//!
//! A ChatBackend knows how to send one prompt to a chat-completion endpoint
//! and return the generated text. Each tier gets its own implementation
//! (OpenAI-compatible for the economy tier, Anthropic for the premium tier),
//! and tests substitute scripted stubs.
//!
//! Every call is a blocking request-response: no streaming, no tool use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Token usage reported by a backend, used for cost accounting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatUsage {
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A completed chat-completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// The generated text.
    pub text: String,

    /// Token usage, when the backend reports it.
    pub usage: Option<ChatUsage>,

    /// Which model actually responded (may differ from requested).
    pub model: String,
}

/// The chat-completion boundary consumed by the executors.
///
/// Implementations own their model name, credentials, and HTTP client.
/// The executors call `complete()` without knowing which backend is
/// behind it — pure polymorphism.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "anthropic", "glm").
    fn name(&self) -> &str;

    /// The model this backend is configured to call.
    fn model(&self) -> &str;

    /// Send a prompt with a completion-length bound and get text back.
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<ChatCompletion, BackendError>;
}
