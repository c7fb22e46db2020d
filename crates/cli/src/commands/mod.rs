//! CLI command implementations and shared wiring.

pub mod chat;
pub mod costs;
pub mod onboard;
pub mod profile_cmd;
pub mod status;

use std::sync::Arc;
use tierbot_config::AppConfig;
use tierbot_core::error::BackendError;
use tierbot_dispatch::{EconomyExecutor, PremiumExecutor};
use tierbot_ledger::{CostLedger, PricingTable};

/// Build the session cost ledger from config.
pub(crate) fn build_ledger(config: &AppConfig) -> Arc<CostLedger> {
    Arc::new(CostLedger::new(config.budget.premium_ceiling_usd))
}

/// Build the economy executor, resolving the backend credential.
pub(crate) fn build_economy(
    config: &AppConfig,
    ledger: Arc<CostLedger>,
) -> Result<EconomyExecutor, BackendError> {
    let backend = tierbot_backends::build_economy(&config.economy)?;
    Ok(EconomyExecutor::new(
        backend,
        ledger,
        config.economy.max_tokens,
        config.economy.unit_cost_usd,
    ))
}

/// Build the premium executor, resolving the backend credential.
pub(crate) fn build_premium(
    config: &AppConfig,
    ledger: Arc<CostLedger>,
) -> Result<PremiumExecutor, BackendError> {
    let backend = tierbot_backends::build_premium(&config.premium)?;
    Ok(PremiumExecutor::new(
        backend,
        ledger,
        PricingTable::with_defaults(),
        config.premium.max_tokens,
        config.budget.premium_estimate_usd,
    ))
}

/// Print actionable guidance when a backend credential is missing.
pub(crate) fn print_credential_help(error: &BackendError) {
    eprintln!();
    eprintln!("  ERROR: {error}");
    eprintln!();
    eprintln!("  Set the backend credentials via environment variables:");
    eprintln!("    TIERBOT_ECONOMY_API_KEY   (or GLM_API_KEY)");
    eprintln!("    TIERBOT_PREMIUM_API_KEY   (or ANTHROPIC_API_KEY)");
    eprintln!();
    eprintln!("  Or add them to your config file:");
    eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
    eprintln!();
}
