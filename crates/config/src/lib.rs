//! Configuration loading, validation, and management for DefenseLab.
//!
//! Loads configuration from `~/.defenselab/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Comma-separated list of targets the lab may scan.
pub const ALLOWED_TARGETS_ENV: &str = "ALLOWED_TARGETS";

/// Comma-separated list of key names the redactor removes.
pub const SENSITIVE_KEYS_ENV: &str = "SENSITIVE_KEYS";

/// `strict` or `safe_defaults`.
pub const SCAN_POLICY_ENV: &str = "DEFENSELAB_SCAN_POLICY";

/// Loopback targets that are always part of the safe set.
pub const SAFE_DEFAULT_TARGETS: [&str; 3] = ["127.0.0.1", "localhost", "::1"];

/// The root configuration structure.
///
/// Maps directly to `~/.defenselab/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    /// Targets explicitly allowed. Empty = nothing beyond the safe defaults.
    #[serde(default)]
    pub allowed_targets: Vec<String>,

    /// Keys removed by the redactor
    #[serde(default = "default_sensitive_keys")]
    pub sensitive_keys: Vec<String>,

    /// How the scanner treats targets missing from `allowed_targets`
    #[serde(default)]
    pub scan_policy: TargetPolicy,

    /// Targets admitted under `TargetPolicy::SafeDefaults` in addition to
    /// `SAFE_DEFAULT_TARGETS`. Entries can only add to the fixed set.
    #[serde(default)]
    pub extra_safe_targets: Vec<String>,
}

/// Gate applied by the mock scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Only explicitly allowed targets; an empty allow-list denies everything.
    Strict,
    /// Explicitly allowed targets plus the safe loopback defaults.
    #[default]
    SafeDefaults,
}

impl FromStr for TargetPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "safe_defaults" | "safe-defaults" => Ok(Self::SafeDefaults),
            other => Err(ConfigError::ValidationError(format!(
                "unknown scan policy '{other}' (expected 'strict' or 'safe_defaults')"
            ))),
        }
    }
}

pub fn default_sensitive_keys() -> Vec<String> {
    vec![
        "api_key".into(),
        "password".into(),
        "secret".into(),
        "token".into(),
    ]
}

/// Split a comma-separated value, trimming each entry and dropping blanks.
///
/// `" a, ,b ,"` parses to `["a", "b"]`.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl LabConfig {
    /// Load configuration from the default path (~/.defenselab/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::read_file(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, without touching the filesystem.
    ///
    /// Reads the environment at call time, so repeated calls observe
    /// changes immediately.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Load and validate configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it, so that environment
    /// overrides get a chance to replace invalid entries first.
    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply `ALLOWED_TARGETS`, `SENSITIVE_KEYS` and `DEFENSELAB_SCAN_POLICY`
    /// from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// - `ALLOWED_TARGETS`, when set, replaces the list (an empty value
    ///   clears it).
    /// - `SENSITIVE_KEYS` replaces the list only if it names at least one key.
    /// - An unparseable scan policy is ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ALLOWED_TARGETS_ENV) {
            self.allowed_targets = parse_list(&raw);
        }

        if let Some(raw) = lookup(SENSITIVE_KEYS_ENV) {
            let keys = parse_list(&raw);
            if keys.is_empty() {
                tracing::debug!("{SENSITIVE_KEYS_ENV} names no keys, keeping configured set");
            } else {
                self.sensitive_keys = keys;
            }
        }

        if let Some(raw) = lookup(SCAN_POLICY_ENV) {
            match raw.parse::<TargetPolicy>() {
                Ok(policy) => self.scan_policy = policy,
                Err(e) => tracing::warn!(value = %raw, "Ignoring {SCAN_POLICY_ENV}: {e}"),
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".defenselab")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = [
            ("allowed_targets", &self.allowed_targets),
            ("sensitive_keys", &self.sensitive_keys),
            ("extra_safe_targets", &self.extra_safe_targets),
        ];
        for (name, entries) in lists {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must not contain blank entries"
                )));
            }
        }

        Ok(())
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            allowed_targets: vec![],
            sensitive_keys: default_sensitive_keys(),
            scan_policy: TargetPolicy::default(),
            extra_safe_targets: vec![],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
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
