//! Data-source gathering — directory scans and capped file reads.
//!
//! The truncation limits here are hard contracts, not performance tweaks:
//! they bound both cost and latency deterministically regardless of source
//! size. All truncation is char-boundary safe.

use std::path::Path;
use tierbot_config::{ProfileConfig, expand_home};
use tracing::debug;

/// Character cap for a directory listing passed to a model call.
pub const DIR_LISTING_MAX_CHARS: usize = 2_000;
/// Character cap for a key file's content.
pub const KEY_FILE_MAX_CHARS: usize = 3_000;
/// Character cap for an export file's content.
pub const EXPORT_FILE_MAX_CHARS: usize = 5_000;

/// Directory scan limits.
pub const SCAN_MAX_DEPTH: usize = 2;
pub const SCAN_MAX_FILES_PER_DIR: usize = 20;
pub const SCAN_MAX_TOTAL: usize = 100;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["venv", "node_modules", "__pycache__", "target"];

/// The class of a data source, which fixes its truncation cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceClass {
    DirectoryScan,
    KeyFile,
    ExportFile,
}

impl SourceClass {
    /// The hard character cap applied before any model call.
    pub fn max_chars(&self) -> usize {
        match self {
            Self::DirectoryScan => DIR_LISTING_MAX_CHARS,
            Self::KeyFile => KEY_FILE_MAX_CHARS,
            Self::ExportFile => EXPORT_FILE_MAX_CHARS,
        }
    }
}

/// One present source, content already truncated to its class cap.
#[derive(Debug, Clone)]
pub struct GatheredSource {
    /// Origin identifier (the configured path, unexpanded).
    pub origin: String,
    /// Human-readable label for prompts.
    pub description: String,
    pub class: SourceClass,
    pub content: String,
}

/// Truncate to at most `max_chars` characters, never splitting a char.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// List files under `root` up to depth 2, at most 20 files per directory
/// and 100 entries total. Hidden entries and dependency directories are
/// skipped. Returns None when `root` is not a directory.
pub fn scan_directory(root: &Path) -> Option<String> {
    if !root.is_dir() {
        return None;
    }

    let mut entries = Vec::new();
    walk(root, root, 0, &mut entries);
    if entries.is_empty() {
        return None;
    }
    Some(entries.join("\n"))
}

fn walk(root: &Path, dir: &Path, depth: usize, entries: &mut Vec<String>) {
    if depth >= SCAN_MAX_DEPTH || entries.len() >= SCAN_MAX_TOTAL {
        return;
    }

    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return;
    };

    // Directory order is platform-dependent; sort for stable output
    let mut children: Vec<_> = read_dir.filter_map(|e| e.ok()).collect();
    children.sort_by_key(|e| e.file_name());

    let mut files_here = 0usize;
    let mut subdirs = Vec::new();

    for child in children {
        let name = child.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        let path = child.path();
        if path.is_dir() {
            if !SKIPPED_DIRS.contains(&name.as_str()) {
                subdirs.push(path);
            }
        } else if files_here < SCAN_MAX_FILES_PER_DIR {
            if let Ok(rel) = path.strip_prefix(root) {
                entries.push(rel.to_string_lossy().to_string());
                files_here += 1;
                if entries.len() >= SCAN_MAX_TOTAL {
                    return;
                }
            }
        }
    }

    for subdir in subdirs {
        walk(root, &subdir, depth + 1, entries);
        if entries.len() >= SCAN_MAX_TOTAL {
            return;
        }
    }
}

/// Read a file's content capped at `max_chars`. Returns None when the file
/// is absent or unreadable — partial data availability is expected and
/// normal, not an error.
pub fn read_file_capped(path: &Path, max_chars: usize) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    Some(truncate_chars(&content, max_chars).to_string())
}

/// Collect all present sources in configured order: directory scans, then
/// key files, then export files. Absent origins are skipped silently.
pub fn gather(config: &ProfileConfig) -> Vec<GatheredSource> {
    let mut gathered = Vec::new();

    for entry in &config.scan_dirs {
        let path = expand_home(&entry.path);
        match scan_directory(&path) {
            Some(listing) => gathered.push(GatheredSource {
                origin: entry.path.clone(),
                description: entry.description.clone(),
                class: SourceClass::DirectoryScan,
                content: truncate_chars(&listing, DIR_LISTING_MAX_CHARS).to_string(),
            }),
            None => debug!(path = %path.display(), "Scan dir absent or empty, skipping"),
        }
    }

    for entry in &config.key_files {
        let path = expand_home(&entry.path);
        match read_file_capped(&path, KEY_FILE_MAX_CHARS) {
            Some(content) if !content.trim().is_empty() => gathered.push(GatheredSource {
                origin: entry.path.clone(),
                description: entry.description.clone(),
                class: SourceClass::KeyFile,
                content,
            }),
            _ => debug!(path = %path.display(), "Key file absent, skipping"),
        }
    }

    for entry in &config.export_files {
        let path = expand_home(&entry.path);
        match read_file_capped(&path, EXPORT_FILE_MAX_CHARS) {
            Some(content) if !content.trim().is_empty() => gathered.push(GatheredSource {
                origin: entry.path.clone(),
                description: entry.description.clone(),
                class: SourceClass::ExportFile,
                content,
            }),
            _ => debug!(path = %path.display(), "Export file absent, skipping"),
        }
    }

    gathered
}
