//! Configuration handling for formgate

use crate::state::{FormKind, PasswordPolicy};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormgateConfig {
    /// Account store location
    pub users_file: Option<PathBuf>,
    /// Shortest accepted password
    pub password_min_length: Option<usize>,
    /// Longest accepted password
    pub password_max_length: Option<usize>,
    /// Form shown at startup
    pub start_form: Option<FormKind>,
}

impl FormgateConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formgate", "formgate")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the account store and log file
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed config file {}", path.display()))
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn users_file(&self) -> PathBuf {
        self.users_file
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("users.json"))
    }

    /// Password bounds, falling back to the defaults for unset keys.
    /// An inverted range is widened so the minimum still applies.
    pub fn password_policy(&self) -> PasswordPolicy {
        let defaults = PasswordPolicy::default();
        let min_length = self.password_min_length.unwrap_or(defaults.min_length);
        let max_length = self
            .password_max_length
            .unwrap_or(defaults.max_length)
            .max(min_length);
        PasswordPolicy {
            min_length,
            max_length,
        }
    }

    pub fn start_form(&self) -> FormKind {
        self.start_form.unwrap_or_default()
    }
}
