//! Action trait — zero-cost local operations behind the direct tier.
//!
//! Each action takes the argument text parsed out of the user's request
//! (the target to open, the command to run, the file to read) and returns a
//! result string. Actions are assumed idempotent-unsafe: failures surface
//! unchanged and are never retried.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ActionError;

/// A single local action.
#[async_trait]
pub trait Action: Send + Sync {
    /// The vocabulary name this action is registered under
    /// (e.g., "open", "run", "read", "wallpaper").
    fn name(&self) -> &str;

    /// One-line description for the help surface.
    fn description(&self) -> &str;

    /// Perform the action. The argument is the remainder of the user's
    /// request after the vocabulary word.
    async fn execute(&self, arg: &str) -> std::result::Result<String, ActionError>;
}

/// Registry mapping vocabulary names to actions.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under its own name.
    pub fn register(&mut self, action: Arc<dyn Action>) {
        self.actions.insert(action.name().to_string(), action);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Registered vocabulary names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
