//! `tierbot profile` — build, update, and show the user profile.

use tierbot_config::AppConfig;
use tierbot_core::error::{DispatchError, ProfileError};
use tierbot_profile::{ProfilePipeline, ProfileStore};

fn build_pipeline(config: &AppConfig) -> Result<ProfilePipeline, Box<dyn std::error::Error>> {
    let ledger = super::build_ledger(config);

    let economy = super::build_economy(config, ledger.clone()).inspect_err(|e| {
        super::print_credential_help(e);
    })?;
    let premium = super::build_premium(config, ledger).inspect_err(|e| {
        super::print_credential_help(e);
    })?;

    Ok(ProfilePipeline::new(
        economy,
        premium,
        ProfileStore::new(config.profile_path()),
        config.profile.clone(),
    ))
}

/// Run the full gather → synthesize → persist pipeline.
pub async fn build(override_budget: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let pipeline = build_pipeline(&config)?;

    println!();
    println!("  Building user profile...");
    println!("  Sources: {} dirs, {} key files, {} exports",
        config.profile.scan_dirs.len(),
        config.profile.key_files.len(),
        config.profile.export_files.len(),
    );
    println!();

    match pipeline.build(override_budget).await {
        Ok((document, report)) => {
            println!("{document}");
            println!();
            println!(
                "  Profile saved to {} ({} chars)",
                pipeline.store().path().display(),
                report.document_chars
            );
            println!(
                "  Sources analyzed: {} ({} degraded)",
                report.sources_processed(),
                report.failed_sources
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("  Profile build failed: {e}");
            if matches!(
                &e,
                ProfileError::SynthesisFailed(DispatchError::BudgetExceeded { .. })
            ) {
                eprintln!("  Re-run with --override-budget to bypass the ceiling.");
            }
            eprintln!("  Any previously saved profile was left untouched.");
            Err(e.into())
        }
    }
}

/// Merge new free-text information into the persisted profile.
pub async fn update(info: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let pipeline = build_pipeline(&config)?;

    let updated = pipeline.merge(info).await?;
    println!("  Profile updated ({} chars)", updated.chars().count());
    Ok(())
}

/// Print the persisted profile document.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = ProfileStore::new(config.profile_path());

    match store.load()? {
        Some(document) => println!("{document}"),
        None => {
            println!("  No profile yet. Run: tierbot profile build");
        }
    }
    Ok(())
}
