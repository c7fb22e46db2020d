//! `tierbot chat` — interactive or single-message routed chat.

use tierbot_actions::default_registry;
use tierbot_config::AppConfig;
use tierbot_core::Request;
use tierbot_dispatch::{DirectExecutor, Router};
use tierbot_profile::{ProfileStore, SNAPSHOT_MAX_CHARS};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let ledger = super::build_ledger(&config);
    let economy = match super::build_economy(&config, ledger.clone()) {
        Ok(exec) => exec,
        Err(e) => {
            super::print_credential_help(&e);
            return Err(e.into());
        }
    };
    let premium = match super::build_premium(&config, ledger.clone()) {
        Ok(exec) => exec,
        Err(e) => {
            super::print_credential_help(&e);
            return Err(e.into());
        }
    };

    let direct = DirectExecutor::new(default_registry(&config.actions));
    let router = Router::new(direct, economy, premium);
    let store = ProfileStore::new(config.profile_path());

    if let Some(text) = message {
        // Single message mode
        let snapshot = store.snapshot(SNAPSHOT_MAX_CHARS);
        let outcome = router
            .route(&Request::new(&text), snapshot.as_deref())
            .await?;
        println!("{}", outcome.response);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Tierbot — requests are routed by cost tier");
    println!();
    println!("  Economy model: {}", config.economy.model);
    println!("  Premium model: {} (ceiling ${:.2})", config.premium.model, ledger.ceiling());
    println!("  Profile:       {}", store.state());
    println!();
    println!("  Direct commands: wallpaper <subject>, open <target>, run <cmd>, read <file>");
    println!("  Type 'costs' for spending, 'exit' to quit.");
    println!();

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    print_prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            print_prompt();
            continue;
        }
        if matches!(line.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }
        if matches!(line.as_str(), "costs" | "cost" | "stats") {
            print_costs(&ledger);
            print_prompt();
            continue;
        }

        // Load an immutable profile snapshot once per request
        let snapshot = store.snapshot(SNAPSHOT_MAX_CHARS);
        match router.route(&Request::new(&line), snapshot.as_deref()).await {
            Ok(outcome) => {
                println!();
                println!("  [{}]", outcome.tier);
                for out_line in outcome.response.lines() {
                    println!("  {out_line}");
                }
                println!();
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print_prompt();
    }

    println!();
    println!("  Session spend: ${:.4} premium", ledger.total(tierbot_core::Tier::Premium));
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("  You > ");
    let _ = std::io::stdout().flush();
}

fn print_costs(ledger: &tierbot_ledger::CostLedger) {
    let snap = ledger.snapshot();
    println!();
    println!("  Session costs:");
    println!("    economy: ${:.4}", snap.economy_usd);
    println!("    premium: ${:.4} / ${:.4} ceiling", snap.premium_usd, snap.premium_ceiling_usd);
    println!("    entries: {}", snap.entry_count);
    println!();
}
