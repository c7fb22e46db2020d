//! Direct executor — zero-cost local actions, no model call.

use tierbot_core::ActionRegistry;
use tierbot_core::error::ActionError;
use tracing::debug;

use crate::classifier::DirectCommand;

/// Dispatches parsed direct commands to their registered actions.
///
/// No retry, no cost entry. Failures surface the underlying action's error
/// unchanged: local actions are assumed idempotent-unsafe and must not be
/// silently repeated.
pub struct DirectExecutor {
    registry: ActionRegistry,
}

impl DirectExecutor {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, command: &DirectCommand) -> Result<String, ActionError> {
        let name = command.action_name();
        debug!(action = name, "Executing direct action");

        let action = self
            .registry
            .get(name)
            .ok_or_else(|| ActionError::Unknown(name.to_string()))?;

        action.execute(command.arg()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tierbot_core::action::Action;

    struct RecordingAction {
        name: &'static str,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingAction {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Action for RecordingAction {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test"
        }

        async fn execute(&self, arg: &str) -> Result<String, ActionError> {
            self.seen.lock().unwrap().push(arg.to_string());
            Ok(format!("done: {arg}"))
        }
    }

    #[tokio::test]
    async fn dispatches_to_named_action() {
        let open = Arc::new(RecordingAction::new("open"));
        let mut registry = ActionRegistry::new();
        registry.register(open.clone());

        let exec = DirectExecutor::new(registry);
        let result = exec
            .execute(&DirectCommand::Open("spotify".into()))
            .await
            .unwrap();

        assert_eq!(result, "done: spotify");
        assert_eq!(open.seen.lock().unwrap().as_slice(), ["spotify"]);
    }

    #[tokio::test]
    async fn unregistered_action_is_unknown() {
        let exec = DirectExecutor::new(ActionRegistry::new());
        let result = exec.execute(&DirectCommand::Run("ls".into())).await;
        assert!(matches!(result, Err(ActionError::Unknown(_))));
    }
}
