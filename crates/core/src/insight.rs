//! Insight — the economy tier's per-source analysis result.
//!
//! An Insight is never absent: it is always either summary text or an
//! explicit failure, so downstream aggregation never branches on `Option`
//! and cannot mistake a degraded result for real content.

use serde::{Deserialize, Serialize};

/// Marker text used when an analysis degrades after retry exhaustion.
pub const FAILURE_MARKER: &str = "Analysis failed";

/// The outcome of analyzing one data source through the economy tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum Insight {
    /// Short bullet-point analysis text.
    Summary(String),
    /// All retry attempts were exhausted; the enclosing batch continues.
    Failed,
}

impl Insight {
    /// The summary text, if the analysis succeeded.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Summary(text) => Some(text),
            Self::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary(text) => write!(f, "{text}"),
            Self::Failed => write!(f, "{FAILURE_MARKER}"),
        }
    }
}
