//! Settings data model
//!
//! The fixed set of user preferences managed by the store. Each field has a
//! durable key used by the preference medium and a typed value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::SettingsError;

/// Default keycap theme
pub const DEFAULT_THEME_NAME: &str = "olivia_dark";

/// Default UI language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Light or dark application chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SettingsError::InvalidSetting {
                key: SettingsField::ThemeMode.key().to_string(),
                reason: format!("expected light or dark, got '{}'", other),
            }),
        }
    }
}

/// Keymap preview rendering path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RenderMode {
    #[default]
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2D",
            Self::ThreeD => "3D",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2D" => Ok(Self::TwoD),
            "3D" => Ok(Self::ThreeD),
            other => Err(SettingsError::InvalidSetting {
                key: SettingsField::RenderMode.key().to_string(),
                reason: format!("expected 2D or 3D, got '{}'", other),
            }),
        }
    }
}

/// One of the managed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    ShowDesignTab,
    DisableFastRemap,
    ThemeMode,
    ThemeName,
    LangName,
    RenderMode,
}

impl SettingsField {
    /// Every field, in display order
    pub const ALL: [SettingsField; 6] = [
        SettingsField::ShowDesignTab,
        SettingsField::DisableFastRemap,
        SettingsField::ThemeMode,
        SettingsField::ThemeName,
        SettingsField::RenderMode,
        SettingsField::LangName,
    ];

    /// Durable storage key
    pub fn key(self) -> &'static str {
        match self {
            Self::ShowDesignTab => "showDesignTab",
            Self::DisableFastRemap => "disableFastRemap",
            Self::ThemeMode => "themeMode",
            Self::ThemeName => "themeName",
            Self::LangName => "langName",
            Self::RenderMode => "renderMode",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl std::fmt::Display for SettingsField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Typed value of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    ThemeMode(ThemeMode),
    Text(String),
    RenderMode(RenderMode),
}

impl SettingValue {
    /// Encode for the preference medium
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::ThemeMode(mode) => Value::String(mode.as_str().to_string()),
            Self::Text(text) => Value::String(text.clone()),
            Self::RenderMode(mode) => Value::String(mode.as_str().to_string()),
        }
    }

    /// Decode a stored value, checking that its shape fits `field`
    pub fn from_json(field: SettingsField, value: &Value) -> Result<Self, SettingsError> {
        let shape_error = || SettingsError::InvalidSetting {
            key: field.key().to_string(),
            reason: format!("unexpected stored value {}", value),
        };

        match field {
            SettingsField::ShowDesignTab | SettingsField::DisableFastRemap => {
                value.as_bool().map(Self::Bool).ok_or_else(shape_error)
            }
            SettingsField::ThemeMode => value
                .as_str()
                .ok_or_else(shape_error)?
                .parse()
                .map(Self::ThemeMode),
            SettingsField::ThemeName | SettingsField::LangName => value
                .as_str()
                .map(|s| Self::Text(s.to_string()))
                .ok_or_else(shape_error),
            SettingsField::RenderMode => value
                .as_str()
                .ok_or_else(shape_error)?
                .parse()
                .map(Self::RenderMode),
        }
    }

    /// Parse the `Display` form of a value for `field`
    pub fn parse(field: SettingsField, text: &str) -> Result<Self, SettingsError> {
        match field {
            SettingsField::ShowDesignTab | SettingsField::DisableFastRemap => text
                .parse()
                .map(Self::Bool)
                .map_err(|_| SettingsError::InvalidSetting {
                    key: field.key().to_string(),
                    reason: format!("expected true or false, got '{}'", text),
                }),
            SettingsField::ThemeMode => text.parse().map(Self::ThemeMode),
            SettingsField::ThemeName | SettingsField::LangName => Ok(Self::Text(text.to_string())),
            SettingsField::RenderMode => text.parse().map(Self::RenderMode),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::ThemeMode(mode) => write!(f, "{}", mode),
            Self::Text(text) => f.write_str(text),
            Self::RenderMode(mode) => write!(f, "{}", mode),
        }
    }
}

/// Current values of every managed setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    pub show_design_tab: bool,
    pub disable_fast_remap: bool,
    pub theme_mode: ThemeMode,
    pub theme_name: String,
    pub lang_name: String,
    pub render_mode: RenderMode,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            show_design_tab: false,
            disable_fast_remap: false,
            theme_mode: ThemeMode::default(),
            theme_name: DEFAULT_THEME_NAME.to_string(),
            lang_name: DEFAULT_LANGUAGE.to_string(),
            render_mode: RenderMode::default(),
        }
    }
}

impl SettingsState {
    /// Read one field as a typed value
    pub fn get(&self, field: SettingsField) -> SettingValue {
        match field {
            SettingsField::ShowDesignTab => SettingValue::Bool(self.show_design_tab),
            SettingsField::DisableFastRemap => SettingValue::Bool(self.disable_fast_remap),
            SettingsField::ThemeMode => SettingValue::ThemeMode(self.theme_mode),
            SettingsField::ThemeName => SettingValue::Text(self.theme_name.clone()),
            SettingsField::LangName => SettingValue::Text(self.lang_name.clone()),
            SettingsField::RenderMode => SettingValue::RenderMode(self.render_mode),
        }
    }

    /// Write one field; returns false when the value kind does not fit the field
    pub(crate) fn set(&mut self, field: SettingsField, value: SettingValue) -> bool {
        match (field, value) {
            (SettingsField::ShowDesignTab, SettingValue::Bool(b)) => self.show_design_tab = b,
            (SettingsField::DisableFastRemap, SettingValue::Bool(b)) => self.disable_fast_remap = b,
            (SettingsField::ThemeMode, SettingValue::ThemeMode(mode)) => self.theme_mode = mode,
            (SettingsField::ThemeName, SettingValue::Text(name)) => self.theme_name = name,
            (SettingsField::LangName, SettingValue::Text(name)) => self.lang_name = name,
            (SettingsField::RenderMode, SettingValue::RenderMode(mode)) => self.render_mode = mode,
            _ => return false,
        }
        true
    }
}
