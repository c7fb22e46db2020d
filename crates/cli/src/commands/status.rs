//! `tierbot status` — configuration and profile state.

use tierbot_config::AppConfig;
use tierbot_profile::{ProfileStore, has_all_sections};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = ProfileStore::new(config.profile_path());

    println!("Tierbot Status");
    println!("─────────────────────────────────────");
    println!("  Config:        {}", AppConfig::config_dir().join("config.toml").display());
    println!("  Economy model: {}", config.economy.model);
    println!("  Premium model: {}", config.premium.model);
    println!("  Premium ceiling: ${:.2}", config.budget.premium_ceiling_usd);
    println!(
        "  Economy key:   {}",
        if config.economy.api_key.is_some() { "configured" } else { "missing" }
    );
    println!(
        "  Premium key:   {}",
        if config.premium.api_key.is_some() { "configured" } else { "missing" }
    );
    println!();
    println!("  Profile: {} ({})", store.state(), store.path().display());

    if let Some(document) = store.load()? {
        println!("    {} chars", document.chars().count());
        if !has_all_sections(&document) {
            println!("    warning: document is missing required sections");
        }
    }

    println!();
    println!(
        "  Data sources: {} dirs, {} key files, {} exports",
        config.profile.scan_dirs.len(),
        config.profile.key_files.len(),
        config.profile.export_files.len()
    );

    Ok(())
}
