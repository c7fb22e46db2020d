//! Set-wallpaper action — apply a wallpaper via a configured command.
//!
//! Image sourcing (search, download, verification) is an external
//! collaborator; this action only substitutes the target into the
//! configured command template and runs it.

use async_trait::async_trait;
use tierbot_core::action::Action;
use tierbot_core::error::ActionError;
use tokio::process::Command;
use tracing::debug;

pub struct SetWallpaperAction {
    /// Shell template; `{target}` is replaced with the image path or query.
    command_template: String,
}

impl SetWallpaperAction {
    pub fn new(command_template: String) -> Self {
        Self { command_template }
    }

    fn render(&self, target: &str) -> String {
        self.command_template.replace("{target}", target)
    }
}

#[async_trait]
impl Action for SetWallpaperAction {
    fn name(&self) -> &str {
        "wallpaper"
    }

    fn description(&self) -> &str {
        "Set the desktop wallpaper to the given image"
    }

    async fn execute(&self, arg: &str) -> Result<String, ActionError> {
        let target = arg.trim();
        if target.is_empty() {
            return Err(ActionError::Failed {
                action: "wallpaper".into(),
                reason: "no image given".into(),
            });
        }

        let command = self.render(target);
        debug!(command = %command, "Setting wallpaper");

        let output = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", &command]).output()
        } else {
            Command::new("sh").args(["-c", &command]).output()
        }
        .await
        .map_err(|e| ActionError::Failed {
            action: "wallpaper".into(),
            reason: e.to_string(),
        })?;

        if output.status.success() {
            Ok(format!("Wallpaper set: {target}"))
        } else {
            Err(ActionError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitution() {
        let action = SetWallpaperAction::new("feh --bg-fill {target}".into());
        assert_eq!(
            action.render("/tmp/sunset.jpg"),
            "feh --bg-fill /tmp/sunset.jpg"
        );
    }

    #[tokio::test]
    async fn empty_target_rejected() {
        let action = SetWallpaperAction::new("true {target}".into());
        assert!(action.execute("").await.is_err());
    }

    #[tokio::test]
    async fn successful_command_reports_target() {
        let action = SetWallpaperAction::new("true".into());
        let result = action.execute("/tmp/x.jpg").await.unwrap();
        assert!(result.contains("/tmp/x.jpg"));
    }

    #[tokio::test]
    async fn failing_command_surfaces_exit() {
        let action = SetWallpaperAction::new("false".into());
        let result = action.execute("/tmp/x.jpg").await;
        assert!(matches!(result, Err(ActionError::NonZeroExit { .. })));
    }
}
