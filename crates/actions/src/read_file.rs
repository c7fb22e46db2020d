//! Read-file action — return file contents.

use async_trait::async_trait;
use tierbot_core::action::Action;
use tierbot_core::error::ActionError;
use tierbot_config::expand_home;

pub struct ReadFileAction;

impl ReadFileAction {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadFileAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for ReadFileAction {
    fn name(&self) -> &str {
        "read"
    }

    fn description(&self) -> &str {
        "Read the contents of a file at the given path"
    }

    async fn execute(&self, arg: &str) -> Result<String, ActionError> {
        let path = arg.trim();
        if path.is_empty() {
            return Err(ActionError::Failed {
                action: "read".into(),
                reason: "no path given".into(),
            });
        }

        let path = expand_home(path);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ActionError::Io(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        writeln!(f, "Hello, world!").unwrap();

        let action = ReadFileAction::new();
        let result = action.execute(file_path.to_str().unwrap()).await.unwrap();
        assert!(result.contains("Hello, world!"));
    }

    #[tokio::test]
    async fn read_nonexistent_file_surfaces_error() {
        let action = ReadFileAction::new();
        let result = action.execute("/tmp/tierbot_test_missing_12345.txt").await;
        assert!(matches!(result, Err(ActionError::Io(_))));
    }

    #[tokio::test]
    async fn missing_path_rejected() {
        let action = ReadFileAction::new();
        assert!(action.execute("").await.is_err());
    }
}
