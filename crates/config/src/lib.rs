//! Configuration loading, validation, and management for Tierbot.
//!
//! Loads configuration from `~/.tierbot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.tierbot/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Economy (low-cost) backend settings.
    #[serde(default = "TierBackendConfig::economy_defaults")]
    pub economy: TierBackendConfig,

    /// Premium (high-cost) backend settings.
    #[serde(default = "TierBackendConfig::premium_defaults")]
    pub premium: TierBackendConfig,

    /// Premium spend discipline.
    #[serde(default)]
    pub budget: BudgetConfig,

    /// Profile pipeline data sources and known facts.
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Direct-tier action settings.
    #[serde(default)]
    pub actions: ActionsConfig,
}

/// Settings for one backend tier.
#[derive(Clone, Serialize, Deserialize)]
pub struct TierBackendConfig {
    /// API key. Usually supplied via environment instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the backend base URL (proxies, self-hosted endpoints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Model to call on this tier.
    pub model: String,

    /// Completion-length bound per call.
    pub max_tokens: u32,

    /// Cost recorded in the ledger per call attempt. The economy tier is
    /// defined as free by default; deployments that assign it a nonzero
    /// cost still record every attempt, including failed ones.
    #[serde(default)]
    pub unit_cost_usd: f64,
}

impl TierBackendConfig {
    fn economy_defaults() -> Self {
        Self {
            api_key: None,
            api_url: None,
            model: "glm-4-flash".into(),
            max_tokens: 1500,
            unit_cost_usd: 0.0,
        }
    }

    fn premium_defaults() -> Self {
        Self {
            api_key: None,
            api_url: None,
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 4000,
            unit_cost_usd: 0.0,
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for TierBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierBackendConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("unit_cost_usd", &self.unit_cost_usd)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("economy", &self.economy)
            .field("premium", &self.premium)
            .field("budget", &self.budget)
            .field("profile", &self.profile)
            .field("actions", &self.actions)
            .finish()
    }
}

/// Premium spend discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Hard ceiling on cumulative premium spend per session, in USD.
    /// Crossing it requires an explicit override from the caller.
    #[serde(default = "default_premium_ceiling")]
    pub premium_ceiling_usd: f64,

    /// Flat pre-call estimate used by the affordability check. The actual
    /// cost recorded after the call is derived from reported token usage.
    #[serde(default = "default_premium_estimate")]
    pub premium_estimate_usd: f64,
}

fn default_premium_ceiling() -> f64 {
    1.00
}
fn default_premium_estimate() -> f64 {
    0.10
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            premium_ceiling_usd: default_premium_ceiling(),
            premium_estimate_usd: default_premium_estimate(),
        }
    }
}

/// One configured data-source origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Filesystem path; `~` expands to the home directory.
    pub path: String,

    /// Human-readable label injected into analysis prompts.
    pub description: String,
}

impl SourceEntry {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Profile pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Override the persisted profile location
    /// (default: `~/.tierbot/profile.md`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Facts known from direct conversation, injected verbatim into the
    /// synthesis prompt.
    #[serde(default)]
    pub known_facts: Vec<String>,

    /// Directories scanned (depth 2) during gathering, in order.
    #[serde(default = "default_scan_dirs")]
    pub scan_dirs: Vec<SourceEntry>,

    /// Individual files read during gathering, in order.
    #[serde(default)]
    pub key_files: Vec<SourceEntry>,

    /// Exported data files (histories, dumps) read during gathering, in order.
    #[serde(default = "default_export_files")]
    pub export_files: Vec<SourceEntry>,
}

fn default_scan_dirs() -> Vec<SourceEntry> {
    vec![
        SourceEntry::new("~/projects", "Project checkouts"),
        SourceEntry::new("~/Desktop", "Desktop files"),
        SourceEntry::new("~/Documents", "Documents"),
    ]
}

fn default_export_files() -> Vec<SourceEntry> {
    vec![SourceEntry::new(
        "~/.tierbot/history.json",
        "Assistant interaction history",
    )]
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            path: None,
            known_facts: Vec::new(),
            scan_dirs: default_scan_dirs(),
            key_files: Vec::new(),
            export_files: default_export_files(),
        }
    }
}

/// Direct-tier action configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// If non-empty, only these base commands may be run via `run <cmd>`.
    #[serde(default)]
    pub allowed_commands: Vec<String>,

    /// Timeout applied to `run <cmd>`.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Shell template invoked by the wallpaper action; `{target}` is
    /// replaced with the requested image path or query.
    #[serde(default = "default_wallpaper_command")]
    pub wallpaper_command: String,
}

fn default_command_timeout() -> u64 {
    60
}

fn default_wallpaper_command() -> String {
    if cfg!(target_os = "macos") {
        r#"osascript -e 'tell application "System Events" to tell every desktop to set picture to "{target}"'"#
            .into()
    } else {
        "feh --bg-fill {target}".into()
    }
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            allowed_commands: Vec::new(),
            command_timeout_secs: default_command_timeout(),
            wallpaper_command: default_wallpaper_command(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`~/.tierbot/config.toml`).
    ///
    /// Environment overrides, highest priority first:
    /// - `TIERBOT_ECONOMY_API_KEY` / `GLM_API_KEY` — economy credential
    /// - `TIERBOT_PREMIUM_API_KEY` / `ANTHROPIC_API_KEY` — premium credential
    /// - `TIERBOT_ECONOMY_MODEL`, `TIERBOT_PREMIUM_MODEL` — model overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.economy.api_key.is_none() {
            config.economy.api_key = std::env::var("TIERBOT_ECONOMY_API_KEY")
                .ok()
                .or_else(|| std::env::var("GLM_API_KEY").ok());
        }
        if config.premium.api_key.is_none() {
            config.premium.api_key = std::env::var("TIERBOT_PREMIUM_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("TIERBOT_ECONOMY_MODEL") {
            config.economy.model = model;
        }
        if let Ok(model) = std::env::var("TIERBOT_PREMIUM_MODEL") {
            config.premium.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        home_dir().join(".tierbot")
    }

    /// Resolved path of the persisted profile document.
    pub fn profile_path(&self) -> PathBuf {
        match &self.profile.path {
            Some(path) => expand_home(path),
            None => Self::config_dir().join("profile.md"),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.budget.premium_ceiling_usd < 0.0 {
            return Err(ConfigError::ValidationError(
                "budget.premium_ceiling_usd must not be negative".into(),
            ));
        }
        if self.budget.premium_estimate_usd < 0.0 {
            return Err(ConfigError::ValidationError(
                "budget.premium_estimate_usd must not be negative".into(),
            ));
        }
        if self.economy.max_tokens == 0 || self.premium.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            economy: TierBackendConfig::economy_defaults(),
            premium: TierBackendConfig::premium_defaults(),
            budget: BudgetConfig::default(),
            profile: ProfileConfig::default(),
            actions: ActionsConfig::default(),
        }
    }
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.economy.model, "glm-4-flash");
        assert_eq!(config.premium.model, "claude-sonnet-4-20250514");
        assert!((config.budget.premium_ceiling_usd - 1.0).abs() < 1e-10);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.economy.model, config.economy.model);
        assert_eq!(parsed.profile.scan_dirs.len(), config.profile.scan_dirs.len());
    }

    #[test]
    fn negative_ceiling_rejected() {
        let config = AppConfig {
            budget: BudgetConfig {
                premium_ceiling_usd: -1.0,
                ..BudgetConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().economy.max_tokens, 1500);
    }

    #[test]
    fn parse_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not toml [[").unwrap();
        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn source_lists_parse() {
        let toml_str = r#"
[profile]
known_facts = ["Name: Alex", "Ships fast"]

[[profile.scan_dirs]]
path = "~/code"
description = "Code checkouts"

[[profile.key_files]]
path = "~/code/notes.md"
description = "Working notes"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.profile.scan_dirs.len(), 1);
        assert_eq!(config.profile.scan_dirs[0].path, "~/code");
        assert_eq!(config.profile.key_files.len(), 1);
        assert_eq!(config.profile.known_facts.len(), 2);
    }

    #[test]
    fn expand_home_prefix() {
        let home = home_dir();
        assert_eq!(expand_home("~/x/y"), home.join("x/y"));
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
    }

    #[test]
    fn debug_redacts_api_keys() {
        let config = AppConfig {
            economy: TierBackendConfig {
                api_key: Some("sk-secret".into()),
                ..TierBackendConfig::economy_defaults()
            },
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("glm-4-flash"));
        assert!(toml_str.contains("premium_ceiling_usd"));
    }
}
