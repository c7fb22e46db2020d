//! Open-target action — open an application or URL with the platform opener.

use async_trait::async_trait;
use tierbot_core::action::Action;
use tierbot_core::error::ActionError;
use tokio::process::Command;
use tracing::debug;

pub struct OpenTargetAction;

impl OpenTargetAction {
    pub fn new() -> Self {
        Self
    }

    fn looks_like_url(target: &str) -> bool {
        target.starts_with("http://")
            || target.starts_with("https://")
            || (target.contains('.') && !target.contains(' ') && !target.contains('/'))
    }

    /// Normalize bare domains ("spotify.com") to a URL the opener accepts.
    fn normalize(target: &str) -> String {
        if Self::looks_like_url(target) && !target.starts_with("http") {
            format!("https://{target}")
        } else {
            target.to_string()
        }
    }
}

impl Default for OpenTargetAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for OpenTargetAction {
    fn name(&self) -> &str {
        "open"
    }

    fn description(&self) -> &str {
        "Open an application or URL"
    }

    async fn execute(&self, arg: &str) -> Result<String, ActionError> {
        let target = arg.trim();
        if target.is_empty() {
            return Err(ActionError::Failed {
                action: "open".into(),
                reason: "no target given".into(),
            });
        }

        let normalized = Self::normalize(target);
        debug!(target = %normalized, "Opening target");

        let output = if cfg!(target_os = "macos") {
            if Self::looks_like_url(target) {
                Command::new("open").arg(&normalized).output().await
            } else {
                Command::new("open").args(["-a", target]).output().await
            }
        } else if cfg!(target_os = "windows") {
            Command::new("cmd")
                .args(["/C", "start", "", &normalized])
                .output()
                .await
        } else {
            Command::new("xdg-open").arg(&normalized).output().await
        }
        .map_err(|e| ActionError::Failed {
            action: "open".into(),
            reason: e.to_string(),
        })?;

        if output.status.success() {
            Ok(format!("Opened {target}"))
        } else {
            Err(ActionError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
