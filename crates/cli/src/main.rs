//! Tierbot CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize the config directory
//! - `chat`    — Route requests interactively or one-shot
//! - `profile` — Build, update, or show the user profile
//! - `costs`   — Show the session cost ledger
//! - `status`  — Show configuration and profile state

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "tierbot",
    about = "Tierbot — cost-tiered personal assistant runtime",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Chat with the assistant (requests are routed by tier)
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Build, update, or show the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show the session cost ledger
    Costs,

    /// Show configuration and profile state
    Status,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Run the full build pipeline and print the document
    Build {
        /// Allow the premium call even past the budget ceiling
        #[arg(long)]
        override_budget: bool,
    },

    /// Merge new free-text information into the profile
    Update {
        /// The new information to integrate
        info: String,
    },

    /// Print the persisted profile document
    Show,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Build { override_budget } => {
                commands::profile_cmd::build(override_budget).await?
            }
            ProfileAction::Update { info } => commands::profile_cmd::update(&info).await?,
            ProfileAction::Show => commands::profile_cmd::show().await?,
        },
        Commands::Costs => commands::costs::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
