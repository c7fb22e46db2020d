//! Economy executor — the low-cost tier with degrade-not-abort semantics.

use std::sync::Arc;
use tierbot_core::error::BackendError;
use tierbot_core::{ChatBackend, Insight, Tier};
use tierbot_ledger::CostLedger;
use tracing::debug;

use crate::retry::retry_with_degrade;

/// Maximum backend attempts per `analyze` call.
pub const ECONOMY_ATTEMPTS: usize = 3;

/// Wraps the low-cost backend with the bounded-retry policy.
///
/// A single unreachable data source must not abort an enclosing batch, so
/// exhausted retries degrade to [`Insight::Failed`] instead of propagating.
/// Every attempt, successful or not, is recorded in the ledger: retries
/// consume real request quota even at near-zero price.
pub struct EconomyExecutor {
    backend: Arc<dyn ChatBackend>,
    ledger: Arc<CostLedger>,
    max_tokens: u32,
    unit_cost_usd: f64,
}

impl EconomyExecutor {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        ledger: Arc<CostLedger>,
        max_tokens: u32,
        unit_cost_usd: f64,
    ) -> Self {
        Self {
            backend,
            ledger,
            max_tokens,
            unit_cost_usd,
        }
    }

    /// Analyze a prompt, returning summary text or the explicit failure
    /// marker. Never raises.
    pub async fn analyze(&self, prompt: &str) -> Insight {
        retry_with_degrade(
            ECONOMY_ATTEMPTS,
            |attempt| async move {
                debug!(
                    backend = %self.backend.name(),
                    attempt,
                    "Economy analyze attempt"
                );
                let result = self.backend.complete(prompt, self.max_tokens).await;
                self.ledger.record(Tier::Economy, self.unit_cost_usd);
                result.and_then(|completion| {
                    if completion.text.trim().is_empty() {
                        Err(BackendError::EmptyCompletion(
                            self.backend.name().to_string(),
                        ))
                    } else {
                        Ok(Insight::Summary(completion.text))
                    }
                })
            },
            |_| Insight::Failed,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tierbot_core::backend::{ChatCompletion, ChatUsage};
    use tierbot_core::error::BackendError;

    /// A stub backend that fails a fixed number of times before succeeding.
    struct FlakyBackend {
        failures_before_success: usize,
        calls: Mutex<usize>,
    }

    impl FlakyBackend {
        fn new(failures_before_success: usize) -> Self {
            Self {
                failures_before_success,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ChatBackend for FlakyBackend {
        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn complete(
            &self,
            _prompt: &str,
            _max_tokens: u32,
        ) -> Result<ChatCompletion, BackendError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls <= self.failures_before_success {
                Err(BackendError::Network("conn reset".into()))
            } else {
                Ok(ChatCompletion {
                    text: "- bullet".into(),
                    usage: Some(ChatUsage {
                        prompt_tokens: 10,
                        completion_tokens: 5,
                    }),
                    model: "stub-model".into(),
                })
            }
        }
    }

    fn executor(backend: Arc<FlakyBackend>, ledger: Arc<CostLedger>) -> EconomyExecutor {
        EconomyExecutor::new(backend, ledger, 1500, 0.0)
    }

    #[tokio::test]
    async fn success_returns_summary() {
        let backend = Arc::new(FlakyBackend::new(0));
        let ledger = Arc::new(CostLedger::new(1.0));
        let insight = executor(backend.clone(), ledger).analyze("prompt").await;
        assert_eq!(insight.as_text(), Some("- bullet"));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn recovers_within_retry_bound() {
        let backend = Arc::new(FlakyBackend::new(2));
        let ledger = Arc::new(CostLedger::new(1.0));
        let insight = executor(backend.clone(), ledger.clone()).analyze("prompt").await;
        assert!(!insight.is_failed());
        assert_eq!(backend.calls(), 3);
        // Every attempt was recorded, including the failed ones
        assert_eq!(ledger.entry_count(), 3);
    }

    #[tokio::test]
    async fn exhaustion_degrades_to_failure_marker() {
        let backend = Arc::new(FlakyBackend::new(usize::MAX));
        let ledger = Arc::new(CostLedger::new(1.0));
        let insight = executor(backend.clone(), ledger.clone()).analyze("prompt").await;

        assert!(insight.is_failed());
        assert_eq!(insight.to_string(), "Analysis failed");
        // Never more than the bound
        assert_eq!(backend.calls(), ECONOMY_ATTEMPTS);
        assert_eq!(ledger.entry_count(), ECONOMY_ATTEMPTS);
    }

    #[tokio::test]
    async fn blank_completion_degrades_like_a_failure() {
        struct BlankBackend;

        #[async_trait]
        impl ChatBackend for BlankBackend {
            fn name(&self) -> &str {
                "blank"
            }

            fn model(&self) -> &str {
                "blank"
            }

            async fn complete(
                &self,
                _prompt: &str,
                _max_tokens: u32,
            ) -> Result<ChatCompletion, BackendError> {
                Ok(ChatCompletion {
                    text: "   ".into(),
                    usage: None,
                    model: "blank".into(),
                })
            }
        }

        let ledger = Arc::new(CostLedger::new(1.0));
        let exec = EconomyExecutor::new(Arc::new(BlankBackend), ledger, 100, 0.0);
        let insight = exec.analyze("prompt").await;
        // Blank text is never surfaced as a summary
        assert!(insight.is_failed());
    }

    #[tokio::test]
    async fn nonzero_unit_cost_records_failed_attempts() {
        let backend = Arc::new(FlakyBackend::new(usize::MAX));
        let ledger = Arc::new(CostLedger::new(1.0));
        let exec = EconomyExecutor::new(backend, ledger.clone(), 1500, 0.001);
        let _ = exec.analyze("prompt").await;
        assert!((ledger.total(Tier::Economy) - 0.003).abs() < 1e-10);
    }
}
