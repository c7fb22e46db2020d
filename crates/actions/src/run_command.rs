//! Run-command action — execute a shell command.
//!
//! Supports command allowlisting and a timeout. A non-zero exit is reported
//! as an error, not retried: re-running a shell command may have side
//! effects.

use async_trait::async_trait;
use tierbot_core::action::Action;
use tierbot_core::error::ActionError;
use tokio::process::Command;
use tracing::{debug, warn};

pub struct RunCommandAction {
    /// If non-empty, only these base commands are allowed.
    allowed_commands: Vec<String>,
    timeout_secs: u64,
}

impl RunCommandAction {
    pub fn new(allowed_commands: Vec<String>, timeout_secs: u64) -> Self {
        Self {
            allowed_commands,
            timeout_secs,
        }
    }

    fn is_command_allowed(&self, command: &str) -> bool {
        if self.allowed_commands.is_empty() {
            return true; // No allowlist = all commands allowed
        }

        let base_cmd = command.split_whitespace().next().unwrap_or("").trim();
        self.allowed_commands.iter().any(|a| a == base_cmd)
    }
}

#[async_trait]
impl Action for RunCommandAction {
    fn name(&self) -> &str {
        "run"
    }

    fn description(&self) -> &str {
        "Execute a shell command and return its output"
    }

    async fn execute(&self, arg: &str) -> Result<String, ActionError> {
        let command = arg.trim();
        if command.is_empty() {
            return Err(ActionError::Failed {
                action: "run".into(),
                reason: "empty command".into(),
            });
        }

        if !self.is_command_allowed(command) {
            return Err(ActionError::NotAllowed(
                command.split_whitespace().next().unwrap_or("").to_string(),
            ));
        }

        debug!(command = %command, "Executing shell command");

        let child = if cfg!(target_os = "windows") {
            Command::new("cmd").args(["/C", command]).output()
        } else {
            Command::new("sh").args(["-c", command]).output()
        };

        let output = tokio::time::timeout(
            std::time::Duration::from_secs(self.timeout_secs),
            child,
        )
        .await
        .map_err(|_| ActionError::Timeout {
            action: "run".into(),
            timeout_secs: self.timeout_secs,
        })?
        .map_err(|e| ActionError::Failed {
            action: "run".into(),
            reason: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            let text = if stderr.is_empty() {
                stdout
            } else {
                format!("{stdout}\n[stderr]: {stderr}")
            };
            Ok(text.trim().to_string())
        } else {
            let code = output.status.code().unwrap_or(-1);
            warn!(command = %command, exit_code = code, "Command failed");
            Err(ActionError::NonZeroExit {
                code,
                output: format!("{stdout}{stderr}").trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_check() {
        let action = RunCommandAction::new(vec!["ls".into(), "cat".into(), "git".into()], 60);
        assert!(action.is_command_allowed("ls -la"));
        assert!(action.is_command_allowed("git status"));
        assert!(!action.is_command_allowed("rm -rf /"));
        assert!(!action.is_command_allowed("sudo something"));
    }

    #[test]
    fn empty_allowlist_allows_all() {
        let action = RunCommandAction::new(vec![], 60);
        assert!(action.is_command_allowed("anything goes"));
    }

    #[tokio::test]
    async fn execute_echo() {
        let action = RunCommandAction::new(vec![], 60);
        let result = action.execute("echo hello").await.unwrap();
        assert!(result.contains("hello"));
    }

    #[tokio::test]
    async fn blocked_command() {
        let action = RunCommandAction::new(vec!["ls".into()], 60);
        let result = action.execute("rm -rf /tmp/nope").await;
        assert!(matches!(result, Err(ActionError::NotAllowed(_))));
    }

    #[tokio::test]
    async fn nonzero_exit_reported_not_retried() {
        let action = RunCommandAction::new(vec![], 60);
        let result = action.execute("exit 3").await;
        match result {
            Err(ActionError::NonZeroExit { code, .. }) => assert_eq!(code, 3),
            other => panic!("Expected NonZeroExit, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_command_rejected() {
        let action = RunCommandAction::new(vec![], 60);
        assert!(action.execute("   ").await.is_err());
    }
}
