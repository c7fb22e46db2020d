//! `tierbot costs` — cost ledger snapshot and model pricing.

use tierbot_config::AppConfig;
use tierbot_ledger::PricingTable;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let ledger = super::build_ledger(&config);
    let snap = ledger.snapshot();

    println!("Cost Ledger");
    println!("─────────────────────────────────────");
    println!("  Direct:   ${:.4}  (always free)", snap.direct_usd);
    println!("  Economy:  ${:.4}", snap.economy_usd);
    println!("  Premium:  ${:.4} / ${:.4} ceiling", snap.premium_usd, snap.premium_ceiling_usd);
    println!("  Remaining premium budget: ${:.4}", snap.premium_remaining_usd);
    println!("  Entries:  {}", snap.entry_count);
    println!();
    println!("  The ledger is per-session; start `tierbot chat` to accumulate spend.");

    let table = PricingTable::with_defaults();
    println!();
    println!("Model Pricing (per 1M tokens)");
    println!("─────────────────────────────────────────────");
    println!("{:<32} {:>8} {:>8}", "Model", "Input", "Output");
    for name in table.models() {
        if let Some(p) = table.get(&name) {
            println!("{:<32} ${:>6.2} ${:>6.2}", name, p.input_per_m, p.output_per_m);
        }
    }

    Ok(())
}
