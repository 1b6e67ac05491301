//! Error types for the settings crate.
//!
//! This module provides structured error types for settings validation,
//! preference persistence and application configuration.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A proposed value is not legal for its field.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The theme name is not a key of the theme catalog.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// The language code is not a key of the language catalog.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// 3D rendering was requested on a platform that cannot do it.
    #[error("Render mode {0} is not supported on this platform")]
    RenderModeUnsupported(String),

    /// A configuration error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A persistence error occurred.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl SettingsError {
    /// True for errors raised while validating a proposed value
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SettingsError::InvalidSetting { .. }
                | SettingsError::UnknownTheme(_)
                | SettingsError::UnknownLanguage(_)
                | SettingsError::RenderModeUnsupported(_)
        )
    }
}

/// Errors related to application configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is invalid.
    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    /// Platform is not supported for config directory resolution.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// I/O error while reading or writing the config file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Errors related to the durable preference medium.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error during persistence.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON error during persistence.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The preference file extension is not supported.
    #[error("Unsupported preference format: {0}")]
    UnsupportedFormat(String),

    /// A stored entry could not be decoded for its field.
    #[error("Corrupted entry '{key}': {reason}")]
    Corrupted { key: String, reason: String },
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
