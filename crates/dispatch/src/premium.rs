//! Premium executor — the high-cost tier with single-shot, budget-gated,
//! fail-fast semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tierbot_core::error::DispatchError;
use tierbot_core::{ChatBackend, Tier};
use tierbot_ledger::{CostLedger, PricingTable};
use tracing::{info, warn};

/// Wraps the high-cost backend with the hard budget discipline.
///
/// One attempt, no internal retry: premium failures are rare, costly, and
/// should be visible for human review rather than masked. At most one
/// invocation per logical run unless the caller overrides, and the
/// affordability check runs before any network traffic.
pub struct PremiumExecutor {
    backend: Arc<dyn ChatBackend>,
    ledger: Arc<CostLedger>,
    pricing: PricingTable,
    max_tokens: u32,
    estimate_usd: f64,
    invoked: AtomicBool,
}

impl PremiumExecutor {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        ledger: Arc<CostLedger>,
        pricing: PricingTable,
        max_tokens: u32,
        estimate_usd: f64,
    ) -> Self {
        Self {
            backend,
            ledger,
            pricing,
            max_tokens,
            estimate_usd,
            invoked: AtomicBool::new(false),
        }
    }

    /// Reset the one-invocation guard at the start of a new logical run.
    pub fn begin_run(&self) {
        self.invoked.store(false, Ordering::SeqCst);
    }

    /// Single-shot synthesis under the budget gate.
    pub async fn synthesize(&self, prompt: &str) -> Result<String, DispatchError> {
        self.synthesize_with(prompt, false).await
    }

    /// Synthesis with an explicit override of the budget ceiling and the
    /// one-invocation guard. Overrides are a caller decision, never implied.
    pub async fn synthesize_with(
        &self,
        prompt: &str,
        override_budget: bool,
    ) -> Result<String, DispatchError> {
        if !override_budget && !self.ledger.can_afford(Tier::Premium, self.estimate_usd) {
            let spent = self.ledger.total(Tier::Premium);
            warn!(
                spent_usd = spent,
                ceiling_usd = self.ledger.ceiling(),
                "Premium call rejected before invocation"
            );
            return Err(DispatchError::BudgetExceeded {
                spent_usd: spent,
                ceiling_usd: self.ledger.ceiling(),
                estimated_usd: self.estimate_usd,
            });
        }

        if self.invoked.swap(true, Ordering::SeqCst) && !override_budget {
            return Err(DispatchError::InvocationLimit);
        }

        match self.backend.complete(prompt, self.max_tokens).await {
            Ok(completion) => {
                let cost = match completion.usage {
                    Some(usage) => self.pricing.compute_cost(
                        &completion.model,
                        usage.prompt_tokens,
                        usage.completion_tokens,
                    ),
                    // No usage reported: book the estimate rather than zero
                    None => self.estimate_usd,
                };
                self.ledger.record(Tier::Premium, cost);
                info!(
                    backend = %self.backend.name(),
                    model = %completion.model,
                    cost_usd = cost,
                    "Premium call completed"
                );
                Ok(completion.text)
            }
            Err(e) => Err(DispatchError::FatalBackend(e)),
        }
    }
}
