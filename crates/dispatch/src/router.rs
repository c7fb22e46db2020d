//! Router — classify a request and dispatch it to exactly one executor.
//!
//! Economy and premium prompts are enriched with an immutable snapshot of
//! the profile document, loaded once per request by the caller. The router
//! never reads shared mutable state at arbitrary times.

use tierbot_core::error::{ActionError, Error};
use tierbot_core::{Request, Tier};
use tracing::info;

use crate::classifier::{classify, parse_direct};
use crate::direct::DirectExecutor;
use crate::economy::EconomyExecutor;
use crate::premium::PremiumExecutor;

/// The result of routing one request.
#[derive(Debug, Clone)]
pub struct RouteOutcome {
    /// Which tier handled the request.
    pub tier: Tier,
    /// The user-visible response.
    pub response: String,
}

pub struct Router {
    direct: DirectExecutor,
    economy: EconomyExecutor,
    premium: PremiumExecutor,
}

impl Router {
    pub fn new(direct: DirectExecutor, economy: EconomyExecutor, premium: PremiumExecutor) -> Self {
        Self {
            direct,
            economy,
            premium,
        }
    }

    /// Route a request through exactly one tier.
    ///
    /// `profile_context` is the immutable profile snapshot for this request;
    /// when present it is prepended to economy and premium prompts.
    pub async fn route(
        &self,
        request: &Request,
        profile_context: Option<&str>,
    ) -> Result<RouteOutcome, Error> {
        let tier = classify(request);
        info!(tier = %tier, "Routing request");

        match tier {
            Tier::Direct => {
                let command = parse_direct(&request.text)
                    .ok_or_else(|| ActionError::Unknown(request.text.clone()))?;
                let response = self.direct.execute(&command).await?;
                Ok(RouteOutcome { tier, response })
            }
            Tier::Economy => {
                let prompt = enrich(profile_context, &request.text);
                let insight = self.economy.analyze(&prompt).await;
                Ok(RouteOutcome {
                    tier,
                    response: insight.to_string(),
                })
            }
            Tier::Premium => {
                // Each routed request is its own logical run
                self.premium.begin_run();
                let prompt = enrich(profile_context, &request.text);
                let response = self.premium.synthesize(&prompt).await?;
                Ok(RouteOutcome { tier, response })
            }
        }
    }
}

/// Prepend the profile snapshot to a prompt, when one exists.
fn enrich(profile_context: Option<&str>, text: &str) -> String {
    match profile_context {
        Some(profile) if !profile.trim().is_empty() => {
            format!("Context about the user:\n{profile}\n\nRequest:\n{text}")
        }
        _ => text.to_string(),
    }
}
