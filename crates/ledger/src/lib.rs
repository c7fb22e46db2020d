//! Cost tracking and premium budget enforcement for Tierbot.
//!
//! The [`CostLedger`] is pure bookkeeping: it records what each tier spent
//! and answers the affordability question for the premium ceiling. It never
//! rejects a `record` call — refusing work is the caller's job, checked
//! *before* invocation via [`CostLedger::can_afford`].

pub mod ledger;
pub mod pricing;

pub use ledger::{CostEntry, CostLedger, LedgerSnapshot};
pub use pricing::{ModelPricing, PricingTable};
