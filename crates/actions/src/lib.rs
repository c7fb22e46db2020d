//! Direct-tier local actions for Tierbot.
//!
//! These are the zero-cost operations behind the router's fixed vocabulary:
//! open a target, run a command, read a file, set the wallpaper. None of
//! them touch a model or the cost ledger, and none of them retry — local
//! actions are assumed idempotent-unsafe, so failures surface unchanged.

pub mod open_target;
pub mod read_file;
pub mod run_command;
pub mod set_wallpaper;

pub use open_target::OpenTargetAction;
pub use read_file::ReadFileAction;
pub use run_command::RunCommandAction;
pub use set_wallpaper::SetWallpaperAction;

use std::sync::Arc;
use tierbot_config::ActionsConfig;
use tierbot_core::ActionRegistry;

/// Build the standard action registry from config.
pub fn default_registry(config: &ActionsConfig) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(OpenTargetAction::new()));
    registry.register(Arc::new(RunCommandAction::new(
        config.allowed_commands.clone(),
        config.command_timeout_secs,
    )));
    registry.register(Arc::new(ReadFileAction::new()));
    registry.register(Arc::new(SetWallpaperAction::new(
        config.wallpaper_command.clone(),
    )));
    registry
}
