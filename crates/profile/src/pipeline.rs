//! The profile pipeline state machine.
//!
//! Idle → Gathering → Synthesizing → Persisted, with Merging reachable only
//! from Persisted. Strictly sequential: sources are processed one at a time
//! in configured order, and the premium synthesis happens exactly once per
//! build. If synthesis fails, the run fails as a whole — a persisted
//! document always reflects a complete synthesis pass.

use tierbot_config::ProfileConfig;
use tierbot_core::Insight;
use tierbot_core::error::ProfileError;
use tierbot_dispatch::{EconomyExecutor, PremiumExecutor};
use tracing::{info, warn};
use uuid::Uuid;

use crate::prompts;
use crate::sources;
use crate::store::ProfileStore;

/// A merge result shorter than this is treated as degenerate output and
/// discarded, leaving the stored document untouched.
const MERGE_MIN_CHARS: usize = 500;

/// Per-source outcome of the gathering phase.
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub origin: String,
    pub insight: Insight,
}

/// Summary of one build run, for reporting.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub outcomes: Vec<SourceOutcome>,
    pub failed_sources: usize,
    pub document_chars: usize,
}

impl PipelineReport {
    pub fn sources_processed(&self) -> usize {
        self.outcomes.len()
    }
}

/// The gather → summarize → synthesize → persist workflow, plus the
/// incremental merge path.
pub struct ProfilePipeline {
    economy: EconomyExecutor,
    premium: PremiumExecutor,
    store: ProfileStore,
    config: ProfileConfig,
}

impl ProfilePipeline {
    pub fn new(
        economy: EconomyExecutor,
        premium: PremiumExecutor,
        store: ProfileStore,
        config: ProfileConfig,
    ) -> Self {
        Self {
            economy,
            premium,
            store,
            config,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Run a full build: gather, summarize each present source through the
    /// economy tier, synthesize once through the premium tier, persist.
    ///
    /// Economy failures degrade per source and the run continues; a premium
    /// failure aborts the run with no partial write.
    pub async fn build(
        &self,
        override_budget: bool,
    ) -> Result<(String, PipelineReport), ProfileError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Profile build: gathering");

        let gathered = sources::gather(&self.config);
        let mut outcomes = Vec::with_capacity(gathered.len());
        for source in &gathered {
            info!(origin = %source.origin, "Analyzing source");
            let insight = self.economy.analyze(&prompts::analysis(source)).await;
            if insight.is_failed() {
                warn!(origin = %source.origin, "Source analysis degraded");
            }
            outcomes.push(SourceOutcome {
                origin: source.origin.clone(),
                insight,
            });
        }

        info!(%run_id, sources = outcomes.len(), "Profile build: synthesizing");
        self.premium.begin_run();
        let prompt = prompts::synthesis(&outcomes, &self.config.known_facts);
        let document = self
            .premium
            .synthesize_with(&prompt, override_budget)
            .await
            .map_err(ProfileError::SynthesisFailed)?;

        self.store.save(&document)?;
        info!(%run_id, chars = document.chars().count(), "Profile build: persisted");

        let failed_sources = outcomes.iter().filter(|o| o.insight.is_failed()).count();
        let report = PipelineReport {
            run_id,
            failed_sources,
            document_chars: document.chars().count(),
            outcomes,
        };
        Ok((document, report))
    }

    /// Merge free-text new information into the persisted document through
    /// the economy tier. Last-write-wins at document granularity; a degraded
    /// or degenerate merge leaves the stored document untouched (and stale).
    pub async fn merge(&self, new_info: &str) -> Result<String, ProfileError> {
        let current = self.store.load()?.ok_or(ProfileError::NotBuilt)?;

        // New information has arrived: the document is stale until the
        // merge lands.
        self.store.mark_stale()?;

        let prompt = prompts::merge(&current, new_info);
        match self.economy.analyze(&prompt).await {
            Insight::Summary(updated) if updated.chars().count() >= MERGE_MIN_CHARS => {
                self.store.save(&updated)?;
                info!(chars = updated.chars().count(), "Profile merged");
                Ok(updated)
            }
            Insight::Summary(short) => {
                warn!(
                    chars = short.chars().count(),
                    "Merge output too short, keeping current profile"
                );
                Ok(current)
            }
            Insight::Failed => {
                warn!("Merge degraded after retries, keeping current profile");
                Ok(current)
            }
        }
    }
}
