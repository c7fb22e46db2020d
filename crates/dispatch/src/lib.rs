//! Tier classification, executors, and cost-governed routing.
//!
//! The dispatch pipeline is where the cost discipline lives:
//! - [`classify`] picks exactly one tier per request, cheapest rule first.
//! - [`EconomyExecutor`] owns the bounded-retry, degrade-to-marker policy.
//! - [`PremiumExecutor`] owns the single-shot budget gate.
//! - [`DirectExecutor`] performs zero-cost local actions.
//! - [`Router`] dispatches to exactly one executor and enriches paid-tier
//!   prompts with the user-profile snapshot.

pub mod classifier;
pub mod direct;
pub mod economy;
pub mod premium;
pub mod retry;
pub mod router;

pub use classifier::{DirectCommand, classify, parse_direct};
pub use direct::DirectExecutor;
pub use economy::{ECONOMY_ATTEMPTS, EconomyExecutor};
pub use premium::PremiumExecutor;
pub use retry::retry_with_degrade;
pub use router::{RouteOutcome, Router};
