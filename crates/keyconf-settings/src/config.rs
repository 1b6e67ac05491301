//! Application configuration
//!
//! Startup options that are not user preferences: where preferences live,
//! log verbosity, render-path overrides and the first route to show.
//! Supports JSON and TOML files stored in the platform config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "keyconf";

/// Config file name inside [`AppConfig::config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Preference file name inside [`AppConfig::config_dir`]
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Preference file; defaults to `preferences.json` in the config dir
    pub preferences_path: Option<PathBuf>,
    /// Extra `tracing` filter directive (e.g. `keyconf_settings=debug`)
    pub log_filter: Option<String>,
    /// Never offer the 3D render path
    pub force_2d: bool,
    /// Route mounted at startup
    pub initial_route: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_path: None,
            log_filter: None,
            force_2d: false,
            initial_route: "/".to_string(),
        }
    }
}

impl AppConfig {
    /// Platform config directory for the application
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    pub fn config_file_path() -> ConfigResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the config directory if needed
    pub fn ensure_config_dir() -> ConfigResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file from the default location
    ///
    /// A missing file yields defaults silently; an invalid one yields
    /// defaults with a warning.
    pub fn load_or_default() -> Self {
        let path = match Self::config_file_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "No config directory, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
            Self::default()
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.initial_route.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "initial_route".to_string(),
                value: self.initial_route.clone(),
            });
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "log_filter".to_string(),
                    value: filter.clone(),
                });
            }
        }

        Ok(())
    }

    /// Preference file to open
    pub fn resolved_preferences_path(&self) -> ConfigResult<PathBuf> {
        match &self.preferences_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(PREFERENCES_FILE_NAME)),
        }
    }
}
