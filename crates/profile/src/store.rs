//! The profile store — a single persisted markdown artifact.
//!
//! Lifecycle: absent → building → built → stale → updated (updated collapses
//! back to built after a successful merge). File presence alone means
//! built-or-stale; staleness is tracked by a zero-byte sidecar marker so the
//! document itself is never annotated.

use std::path::{Path, PathBuf};
use tierbot_core::error::ProfileError;
use tracing::debug;

use crate::sources::truncate_chars;

/// The nine required section headers of a synthesized profile.
pub const SECTION_HEADERS: [&str; 9] = [
    "## Identity",
    "## Situation",
    "## Goals",
    "## Active Projects",
    "## Skills",
    "## Work Style",
    "## Tech Stack",
    "## Constraints",
    "## Agent Instructions",
];

/// Check a document for the full section schema.
pub fn has_all_sections(content: &str) -> bool {
    SECTION_HEADERS.iter().all(|h| content.contains(h))
}

/// Derived lifecycle state of the persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileState {
    Absent,
    Built,
    Stale,
}

impl std::fmt::Display for ProfileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Built => write!(f, "built"),
            Self::Stale => write!(f, "stale"),
        }
    }
}

/// Default cap for the snapshot injected into prompts.
pub const SNAPSHOT_MAX_CHARS: usize = 1_500;

/// Owns the persisted ProfileDocument. Mutated only through `save`;
/// the router never edits it in place.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn stale_marker(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".stale");
        self.path.with_file_name(name)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the current document, if one is persisted.
    pub fn load(&self) -> Result<Option<String>, ProfileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ProfileError::Storage(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Persist a document verbatim and clear any stale marker.
    pub fn save(&self, content: &str) -> Result<(), ProfileError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProfileError::Storage(format!("Failed to create profile directory: {e}"))
            })?;
        }

        std::fs::write(&self.path, content)
            .map_err(|e| ProfileError::Storage(format!("{}: {e}", self.path.display())))?;

        let marker = self.stale_marker();
        if marker.exists() {
            let _ = std::fs::remove_file(&marker);
        }

        debug!(path = %self.path.display(), chars = content.chars().count(), "Profile saved");
        Ok(())
    }

    /// Record that new information arrived after the last build.
    pub fn mark_stale(&self) -> Result<(), ProfileError> {
        if !self.exists() {
            return Ok(()); // Nothing to go stale
        }
        std::fs::write(self.stale_marker(), b"")
            .map_err(|e| ProfileError::Storage(format!("Failed to write stale marker: {e}")))
    }

    pub fn state(&self) -> ProfileState {
        if !self.exists() {
            ProfileState::Absent
        } else if self.stale_marker().exists() {
            ProfileState::Stale
        } else {
            ProfileState::Built
        }
    }

    /// A truncated immutable snapshot for prompt enrichment, or None when
    /// no profile exists.
    pub fn snapshot(&self, max_chars: usize) -> Option<String> {
        let content = self.load().ok().flatten()?;
        Some(truncate_chars(&content, max_chars).to_string())
    }
}
