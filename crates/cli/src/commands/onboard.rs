//! `tierbot onboard` — write a starter config.

use tierbot_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("  Config already exists: {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml())?;

    println!();
    println!("  Wrote {}", config_path.display());
    println!();
    println!("  Next steps:");
    println!("    1. Export TIERBOT_ECONOMY_API_KEY (or GLM_API_KEY)");
    println!("    2. Export TIERBOT_PREMIUM_API_KEY (or ANTHROPIC_API_KEY)");
    println!("    3. Adjust the [profile] data sources in the config");
    println!("    4. Run: tierbot profile build");
    println!();

    Ok(())
}
