//! KeyConf Settings Crate
//!
//! Handles the user settings of a session: the data model, theme and
//! language catalogs, durable preference storage, the settings store and
//! the derived effects that keep visuals and locale in sync.

pub mod capability;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod persistence;
pub mod state;
pub mod store;

pub use capability::{detect_render_capability, RenderCapability, StaticCapability};
pub use catalog::{KeyColor, Language, LanguageCatalog, ThemeCatalog, ThemeColors};
pub use config::AppConfig;
pub use effects::{
    compute_render_mode_options, effective_render_mode, ActiveLocale, EffectsDispatcher,
    VisualVariables,
};
pub use error::{ConfigError, PersistenceError, SettingsError, SettingsResult};
pub use persistence::{FileMedium, MemoryMedium, PreferenceMedium, PreferenceStore};
pub use state::{RenderMode, SettingValue, SettingsField, SettingsState, ThemeMode};
pub use store::{SelectOption, SettingsChange, SettingsStore};
