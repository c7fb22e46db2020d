//! The cost ledger — append-only spend log with per-tier totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tierbot_core::Tier;

/// One recorded spend event. Append-only; owned exclusively by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    pub tier: Tier,
    pub cost_usd: f64,
    pub timestamp: DateTime<Utc>,
}

/// A point-in-time view of the ledger for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub direct_usd: f64,
    pub economy_usd: f64,
    pub premium_usd: f64,
    pub premium_ceiling_usd: f64,
    pub premium_remaining_usd: f64,
    pub entry_count: usize,
}

#[derive(Debug, Default)]
struct LedgerState {
    entries: Vec<CostEntry>,
    direct_total: f64,
    economy_total: f64,
    premium_total: f64,
}

/// Tracks cumulative spend per tier and enforces the premium ceiling.
///
/// `record` is the only mutator and never rejects a call; refusing work is
/// the caller's job, checked *before* invocation via `can_afford`. Nothing
/// in here returns a Result: bookkeeping has no failure mode.
pub struct CostLedger {
    premium_ceiling_usd: f64,
    state: RwLock<LedgerState>,
}

impl CostLedger {
    /// Create a ledger with the given premium-tier session ceiling.
    pub fn new(premium_ceiling_usd: f64) -> Self {
        Self {
            premium_ceiling_usd,
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Append a cost entry and update the running total for that tier.
    pub fn record(&self, tier: Tier, cost_usd: f64) {
        let mut state = self.state.write().unwrap();
        match tier {
            Tier::Direct => state.direct_total += cost_usd,
            Tier::Economy => state.economy_total += cost_usd,
            Tier::Premium => state.premium_total += cost_usd,
        }
        state.entries.push(CostEntry {
            tier,
            cost_usd,
            timestamp: Utc::now(),
        });
        tracing::debug!(tier = %tier, cost_usd, "Cost recorded");
    }

    /// Whether an estimated spend fits the budget.
    ///
    /// Direct and Economy are always affordable by definition (zero marginal
    /// cost in the cost model); Premium is checked against the ceiling.
    pub fn can_afford(&self, tier: Tier, estimated_usd: f64) -> bool {
        match tier {
            Tier::Direct | Tier::Economy => true,
            Tier::Premium => {
                let state = self.state.read().unwrap();
                state.premium_total + estimated_usd <= self.premium_ceiling_usd
            }
        }
    }

    /// Running total for one tier.
    pub fn total(&self, tier: Tier) -> f64 {
        let state = self.state.read().unwrap();
        match tier {
            Tier::Direct => state.direct_total,
            Tier::Economy => state.economy_total,
            Tier::Premium => state.premium_total,
        }
    }

    /// The configured premium ceiling.
    pub fn ceiling(&self) -> f64 {
        self.premium_ceiling_usd
    }

    /// Number of recorded entries.
    pub fn entry_count(&self) -> usize {
        self.state.read().unwrap().entries.len()
    }

    /// Copy of all entries, oldest first.
    pub fn entries(&self) -> Vec<CostEntry> {
        self.state.read().unwrap().entries.clone()
    }

    /// A point-in-time view for the CLI costs report.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.state.read().unwrap();
        LedgerSnapshot {
            direct_usd: state.direct_total,
            economy_usd: state.economy_total,
            premium_usd: state.premium_total,
            premium_ceiling_usd: self.premium_ceiling_usd,
            premium_remaining_usd: (self.premium_ceiling_usd - state.premium_total).max(0.0),
            entry_count: state.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_updates_totals() {
        let ledger = CostLedger::new(1.0);
        ledger.record(Tier::Economy, 0.0);
        ledger.record(Tier::Premium, 0.25);
        ledger.record(Tier::Premium, 0.30);

        assert!((ledger.total(Tier::Premium) - 0.55).abs() < 1e-10);
        assert!((ledger.total(Tier::Economy) - 0.0).abs() < 1e-10);
        assert_eq!(ledger.entry_count(), 3);
    }

    #[test]
    fn cheap_tiers_always_affordable() {
        let ledger = CostLedger::new(0.0);
        assert!(ledger.can_afford(Tier::Direct, 1_000_000.0));
        assert!(ledger.can_afford(Tier::Economy, 1_000_000.0));
    }

    #[test]
    fn premium_checked_against_ceiling() {
        let ledger = CostLedger::new(1.0);
        assert!(ledger.can_afford(Tier::Premium, 0.9));

        ledger.record(Tier::Premium, 0.95);
        assert!(!ledger.can_afford(Tier::Premium, 0.10));
        assert!(ledger.can_afford(Tier::Premium, 0.05));
    }

    #[test]
    fn record_never_rejects_even_past_ceiling() {
        // Rejection is the caller's job; the ledger just keeps the books.
        let ledger = CostLedger::new(0.10);
        ledger.record(Tier::Premium, 0.50);
        assert!((ledger.total(Tier::Premium) - 0.50).abs() < 1e-10);
        assert!(!ledger.can_afford(Tier::Premium, 0.01));
    }

    #[test]
    fn zero_cost_attempts_are_recorded() {
        let ledger = CostLedger::new(1.0);
        for _ in 0..3 {
            ledger.record(Tier::Economy, 0.0);
        }
        assert_eq!(ledger.entry_count(), 3);
        assert_eq!(
            ledger.entries().iter().filter(|e| e.tier == Tier::Economy).count(),
            3
        );
    }

    #[test]
    fn snapshot_reports_remaining() {
        let ledger = CostLedger::new(1.0);
        ledger.record(Tier::Premium, 0.4);

        let snap = ledger.snapshot();
        assert!((snap.premium_usd - 0.4).abs() < 1e-10);
        assert!((snap.premium_remaining_usd - 0.6).abs() < 1e-10);
        assert_eq!(snap.entry_count, 1);
    }

    #[test]
    fn snapshot_remaining_clamps_at_zero() {
        let ledger = CostLedger::new(0.1);
        ledger.record(Tier::Premium, 0.5);
        let snap = ledger.snapshot();
        assert!((snap.premium_remaining_usd - 0.0).abs() < 1e-10);
    }
}
