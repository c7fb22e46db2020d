//! Chat backend implementations for Tierbot.
//!
//! Two wire formats cover both tiers:
//! - [`OpenAiCompatBackend`] — any OpenAI-compatible `/chat/completions`
//!   endpoint. The economy tier defaults to GLM's endpoint.
//! - [`AnthropicBackend`] — Anthropic's native Messages API, used by the
//!   premium tier.
//!
//! Credentials come from config or environment; a missing credential is a
//! configuration error at construction, never a retry-exhausted failure.

pub mod anthropic;
pub mod openai_compat;

pub use anthropic::AnthropicBackend;
pub use openai_compat::OpenAiCompatBackend;

use std::sync::Arc;
use tierbot_config::TierBackendConfig;
use tierbot_core::{BackendError, ChatBackend};

/// Build the economy-tier backend from config.
///
/// Fails with [`BackendError::NotConfigured`] when no credential is
/// available — surfaced at the executor boundary, before any retries.
pub fn build_economy(config: &TierBackendConfig) -> Result<Arc<dyn ChatBackend>, BackendError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        BackendError::NotConfigured(
            "economy tier: set TIERBOT_ECONOMY_API_KEY or GLM_API_KEY".into(),
        )
    })?;

    let base_url = config
        .api_url
        .clone()
        .unwrap_or_else(|| openai_compat::GLM_BASE_URL.to_string());

    Ok(Arc::new(OpenAiCompatBackend::new(
        "glm",
        base_url,
        api_key,
        &config.model,
    )))
}

/// Build the premium-tier backend from config.
pub fn build_premium(config: &TierBackendConfig) -> Result<Arc<dyn ChatBackend>, BackendError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        BackendError::NotConfigured(
            "premium tier: set TIERBOT_PREMIUM_API_KEY or ANTHROPIC_API_KEY".into(),
        )
    })?;

    let mut backend = AnthropicBackend::new(api_key, &config.model);
    if let Some(url) = &config.api_url {
        backend = backend.with_base_url(url);
    }

    Ok(Arc::new(backend))
}
