//! Derived effects
//!
//! Maps settings values onto the subsystems that depend on them: the
//! process-wide visual variables, the active translation catalog and the
//! set of selectable render modes. Every effect is idempotent.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::{LanguageCatalog, ThemeCatalog};
use crate::state::{RenderMode, SettingsField, SettingsState, ThemeMode, DEFAULT_LANGUAGE};

/// Process-wide visual variables plus the document theme-mode attribute
#[derive(Debug, Default)]
pub struct VisualVariables {
    vars: RwLock<BTreeMap<String, String>>,
    theme_mode: RwLock<Option<ThemeMode>>,
}

impl VisualVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.read().get(name).cloned()
    }

    /// Copy of every variable currently set
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.read().clone()
    }

    /// Mode attribute, `None` before the first application
    pub fn theme_mode(&self) -> Option<ThemeMode> {
        *self.theme_mode.read()
    }

    fn replace(&self, vars: impl IntoIterator<Item = (String, String)>) {
        let mut current = self.vars.write();
        current.clear();
        current.extend(vars);
    }

    fn set_theme_mode(&self, mode: ThemeMode) {
        *self.theme_mode.write() = Some(mode);
    }
}

/// The active translation catalog
#[derive(Debug)]
pub struct ActiveLocale {
    languages: Arc<LanguageCatalog>,
    current: RwLock<String>,
}

impl ActiveLocale {
    pub fn new(languages: Arc<LanguageCatalog>) -> Self {
        Self {
            languages,
            current: RwLock::new(DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Code of the active language
    pub fn current(&self) -> String {
        self.current.read().clone()
    }

    /// Translate `key` in the active language
    ///
    /// Missing keys fall back to the default language, then to the key.
    pub fn t(&self, key: &str) -> String {
        let current = self.current.read();
        [current.as_str(), DEFAULT_LANGUAGE]
            .iter()
            .filter_map(|code| self.languages.get(code))
            .find_map(|language| language.strings.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn switch(&self, code: &str) {
        *self.current.write() = code.to_string();
    }
}

/// Legal render modes for a capability check result
pub fn compute_render_mode_options(capable: bool) -> Vec<RenderMode> {
    if capable {
        vec![RenderMode::TwoD, RenderMode::ThreeD]
    } else {
        vec![RenderMode::TwoD]
    }
}

/// Render mode actually used; a stored 3D degrades to 2D without 3D support
pub fn effective_render_mode(stored: RenderMode, capable: bool) -> RenderMode {
    if compute_render_mode_options(capable).contains(&stored) {
        stored
    } else {
        RenderMode::TwoD
    }
}

/// Applies settings values to their dependent subsystems
#[derive(Debug)]
pub struct EffectsDispatcher {
    themes: Arc<ThemeCatalog>,
    languages: Arc<LanguageCatalog>,
    visuals: Arc<VisualVariables>,
    locale: Arc<ActiveLocale>,
}

impl EffectsDispatcher {
    pub fn new(themes: Arc<ThemeCatalog>, languages: Arc<LanguageCatalog>) -> Self {
        let locale = Arc::new(ActiveLocale::new(languages.clone()));
        Self {
            themes,
            languages,
            visuals: Arc::new(VisualVariables::new()),
            locale,
        }
    }

    pub fn themes(&self) -> &Arc<ThemeCatalog> {
        &self.themes
    }

    pub fn languages(&self) -> &Arc<LanguageCatalog> {
        &self.languages
    }

    pub fn visuals(&self) -> &Arc<VisualVariables> {
        &self.visuals
    }

    pub fn locale(&self) -> &Arc<ActiveLocale> {
        &self.locale
    }

    /// Write the catalog entry for `theme_name` as the visual variables
    pub fn apply_theme(&self, theme_name: &str) {
        match self.themes.get(theme_name) {
            Some(colors) => {
                self.visuals.replace(colors.variables());
                tracing::debug!(theme = theme_name, "Theme applied");
            }
            None => tracing::warn!(theme = theme_name, "Unknown theme, variables unchanged"),
        }
    }

    pub fn apply_theme_mode(&self, mode: ThemeMode) {
        self.visuals.set_theme_mode(mode);
        tracing::debug!(mode = %mode, "Theme mode applied");
    }

    /// Switch the active language; absent or unknown codes use the default
    pub fn apply_locale(&self, lang_name: Option<&str>) {
        let code = match lang_name {
            Some(code) if self.languages.contains(code) => code,
            other => {
                if let Some(code) = other {
                    tracing::warn!(language = code, "Unknown language, using {}", DEFAULT_LANGUAGE);
                }
                DEFAULT_LANGUAGE
            }
        };
        self.locale.switch(code);
        tracing::debug!(language = code, "Locale applied");
    }

    /// Apply every effect for a freshly hydrated state
    pub fn apply_all(&self, state: &SettingsState) {
        self.apply_theme_mode(state.theme_mode);
        self.apply_theme(&state.theme_name);
        self.apply_locale(Some(&state.lang_name));
    }

    /// Run the effect registered for `field`, if any
    pub fn apply_field(&self, field: SettingsField, state: &SettingsState) {
        match field {
            SettingsField::ThemeName => self.apply_theme(&state.theme_name),
            SettingsField::ThemeMode => self.apply_theme_mode(state.theme_mode),
            SettingsField::LangName => self.apply_locale(Some(&state.lang_name)),
            SettingsField::ShowDesignTab
            | SettingsField::DisableFastRemap
            | SettingsField::RenderMode => {}
        }
    }
}
