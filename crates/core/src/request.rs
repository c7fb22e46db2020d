//! Requests and execution tiers.
//!
//! A [`Request`] is ephemeral: created per user interaction, consumed
//! immediately by the router. A [`Tier`] is one of three cost classes of
//! execution, ordered by cost — not by capability.

use serde::{Deserialize, Serialize};

/// The three execution tiers, ordered by increasing cost.
///
/// The derived `Ord` follows this declaration order, so
/// `Tier::Direct < Tier::Economy < Tier::Premium` holds by construction.
/// The router never upgrades a request to a costlier tier without an
/// explicit rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Zero-cost local action — no model call.
    Direct,
    /// The low-cost model, bounded retries, degrade on failure.
    Economy,
    /// The high-cost model, single-shot, budget-gated, fail-fast.
    Premium,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Economy => write!(f, "economy"),
            Self::Premium => write!(f, "premium"),
        }
    }
}

/// A single user request as seen by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Free-text intent.
    pub text: String,

    /// Explicit tier override. When set, classification is skipped and the
    /// request goes to exactly this tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_override: Option<Tier>,
}

impl Request {
    /// Create a request from free text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tier_override: None,
        }
    }

    /// Attach an explicit tier override.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier_override = Some(tier);
        self
    }
}
