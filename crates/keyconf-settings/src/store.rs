//! Settings Store
//!
//! The single session-wide holder of [`SettingsState`]. Consumers receive it
//! as an explicit `Arc<SettingsStore>`; reads go through selectors and
//! writes through actions.
//!
//! Every action validates first. A rejected value leaves the state, the
//! preference medium and the derived subsystems untouched. An accepted
//! value runs one strictly ordered cycle:
//!
//! 1. update the in-memory state
//! 2. persist the field
//! 3. run the field's derived effect
//! 4. notify subscribers, synchronously and in registration order

use keyconf_core::{AppEvent, EventBus, EventCategory, EventFilter, SettingsEvent, SubscriptionId};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::capability::RenderCapability;
use crate::catalog::ThemeCatalog;
use crate::effects::{compute_render_mode_options, effective_render_mode, EffectsDispatcher};
use crate::error::{SettingsError, SettingsResult};
use crate::persistence::PreferenceStore;
use crate::state::{RenderMode, SettingValue, SettingsField, SettingsState, ThemeMode};

/// A committed change, as delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    pub field: SettingsField,
    pub value: SettingValue,
}

/// Selectable option for a settings control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Session settings store
pub struct SettingsStore {
    state: RwLock<SettingsState>,
    preferences: PreferenceStore,
    effects: EffectsDispatcher,
    supports_3d: bool,
    bus: Arc<EventBus>,
}

impl SettingsStore {
    /// Hydrate from `preferences` and apply every derived effect
    ///
    /// Runs before the first pane is mounted so that theme and language are
    /// already correct on first paint.
    pub fn boot(
        preferences: PreferenceStore,
        effects: EffectsDispatcher,
        capability: &dyn RenderCapability,
        bus: Arc<EventBus>,
    ) -> Self {
        let store = Self::hydrate(preferences, effects, capability, bus);
        store.apply_effects();
        store
    }

    /// Build the store from stored preferences without touching the
    /// derived subsystems
    pub fn hydrate(
        preferences: PreferenceStore,
        effects: EffectsDispatcher,
        capability: &dyn RenderCapability,
        bus: Arc<EventBus>,
    ) -> Self {
        let state = preferences.hydrate(effects.themes(), effects.languages());
        let supports_3d = capability.supports_3d();

        if state.render_mode != effective_render_mode(state.render_mode, supports_3d) {
            tracing::info!(
                stored = %state.render_mode,
                "Stored render mode unsupported on this platform, showing 2D"
            );
        }

        tracing::info!(
            theme = %state.theme_name,
            mode = %state.theme_mode,
            language = %state.lang_name,
            "Settings hydrated"
        );

        Self {
            state: RwLock::new(state),
            preferences,
            effects,
            supports_3d,
            bus,
        }
    }

    /// Apply every field's derived effect and announce the hydrated state
    pub fn apply_effects(&self) {
        let state = self.snapshot();
        self.effects.apply_all(&state);
        self.bus.publish(AppEvent::Settings(SettingsEvent::Hydrated));
    }

    // Selectors

    pub fn show_design_tab(&self) -> bool {
        self.state.read().show_design_tab
    }

    pub fn disable_fast_remap(&self) -> bool {
        self.state.read().disable_fast_remap
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.state.read().theme_mode
    }

    pub fn theme_name(&self) -> String {
        self.state.read().theme_name.clone()
    }

    pub fn lang_name(&self) -> String {
        self.state.read().lang_name.clone()
    }

    /// Render mode in effect, degraded to 2D when 3D is unsupported
    pub fn render_mode(&self) -> RenderMode {
        effective_render_mode(self.state.read().render_mode, self.supports_3d)
    }

    /// Render mode as stored, regardless of platform support
    pub fn stored_render_mode(&self) -> RenderMode {
        self.state.read().render_mode
    }

    pub fn snapshot(&self) -> SettingsState {
        self.state.read().clone()
    }

    pub fn supports_3d(&self) -> bool {
        self.supports_3d
    }

    pub fn render_mode_options(&self) -> Vec<RenderMode> {
        compute_render_mode_options(self.supports_3d)
    }

    pub fn theme_options(&self) -> Vec<SelectOption> {
        self.effects
            .themes()
            .names()
            .map(|name| SelectOption::new(name, ThemeCatalog::display_label(name)))
            .collect()
    }

    pub fn language_options(&self) -> Vec<SelectOption> {
        self.effects
            .languages()
            .options()
            .map(|(code, label)| SelectOption::new(code, label))
            .collect()
    }

    /// Derived subsystems (visual variables, active locale)
    pub fn effects(&self) -> &EffectsDispatcher {
        &self.effects
    }

    /// Translate `key` in the active language
    pub fn t(&self, key: &str) -> String {
        self.effects.locale().t(key)
    }

    // Actions

    pub fn toggle_design_tab(&self) -> SettingsResult<()> {
        let next = !self.show_design_tab();
        self.commit(SettingsField::ShowDesignTab, SettingValue::Bool(next))
    }

    pub fn toggle_fast_remap(&self) -> SettingsResult<()> {
        let next = !self.disable_fast_remap();
        self.commit(SettingsField::DisableFastRemap, SettingValue::Bool(next))
    }

    pub fn toggle_theme_mode(&self) -> SettingsResult<()> {
        let next = self.theme_mode().toggled();
        self.commit(SettingsField::ThemeMode, SettingValue::ThemeMode(next))
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) -> SettingsResult<()> {
        self.commit(SettingsField::ThemeMode, SettingValue::ThemeMode(mode))
    }

    pub fn update_theme_name(&self, name: &str) -> SettingsResult<()> {
        self.commit(SettingsField::ThemeName, SettingValue::Text(name.to_string()))
    }

    pub fn update_lang_name(&self, code: &str) -> SettingsResult<()> {
        self.commit(SettingsField::LangName, SettingValue::Text(code.to_string()))
    }

    pub fn update_render_mode(&self, mode: RenderMode) -> SettingsResult<()> {
        self.commit(SettingsField::RenderMode, SettingValue::RenderMode(mode))
    }

    /// Render mode from its label (`"2D"` / `"3D"`)
    pub fn update_render_mode_str(&self, label: &str) -> SettingsResult<()> {
        match label.parse::<RenderMode>() {
            Ok(mode) => self.update_render_mode(mode),
            Err(e) => Err(self.reject(SettingsField::RenderMode, e)),
        }
    }

    /// Register a change listener
    ///
    /// Listeners run after the change is persisted and its effect applied,
    /// in registration order.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SettingsChange) + Send + Sync + 'static,
    {
        self.bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Settings]),
            move |event| {
                let AppEvent::Settings(SettingsEvent::Changed { field, value }) = event else {
                    return;
                };
                let Some(field) = SettingsField::from_key(&field) else {
                    return;
                };
                if let Ok(value) = SettingValue::parse(field, &value) {
                    listener(&SettingsChange { field, value });
                }
            },
        )
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn validate(&self, field: SettingsField, value: &SettingValue) -> SettingsResult<()> {
        let kind_error = || SettingsError::InvalidSetting {
            key: field.key().to_string(),
            reason: format!("value {} has the wrong kind", value),
        };

        match (field, value) {
            (SettingsField::ShowDesignTab | SettingsField::DisableFastRemap, SettingValue::Bool(_)) => Ok(()),
            (SettingsField::ThemeMode, SettingValue::ThemeMode(_)) => Ok(()),
            (SettingsField::ThemeName, SettingValue::Text(name)) => {
                if self.effects.themes().contains(name) {
                    Ok(())
                } else {
                    Err(SettingsError::UnknownTheme(name.clone()))
                }
            }
            (SettingsField::LangName, SettingValue::Text(code)) => {
                if self.effects.languages().contains(code) {
                    Ok(())
                } else {
                    Err(SettingsError::UnknownLanguage(code.clone()))
                }
            }
            (SettingsField::RenderMode, SettingValue::RenderMode(mode)) => {
                if self.render_mode_options().contains(mode) {
                    Ok(())
                } else {
                    Err(SettingsError::RenderModeUnsupported(mode.to_string()))
                }
            }
            _ => Err(kind_error()),
        }
    }

    fn commit(&self, field: SettingsField, value: SettingValue) -> SettingsResult<()> {
        if let Err(e) = self.validate(field, &value) {
            return Err(self.reject(field, e));
        }

        let committed = {
            let mut state = self.state.write();
            state.set(field, value.clone());
            state.clone()
        };

        self.preferences.save(field, &value);
        self.effects.apply_field(field, &committed);

        tracing::info!(field = %field, value = %value, "Setting changed");
        self.bus.publish(AppEvent::Settings(SettingsEvent::Changed {
            field: field.key().to_string(),
            value: value.to_string(),
        }));
        Ok(())
    }

    fn reject(&self, field: SettingsField, error: SettingsError) -> SettingsError {
        tracing::debug!(field = %field, error = %error, "Setting rejected");
        self.bus.publish(AppEvent::Settings(SettingsEvent::Rejected {
            field: field.key().to_string(),
            reason: error.to_string(),
        }));
        error
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("state", &*self.state.read())
            .field("supports_3d", &self.supports_3d)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::StaticCapability;
    use crate::catalog::LanguageCatalog;
    use crate::error::PersistenceResult;
    use crate::persistence::{MemoryMedium, PreferenceMedium};
    use parking_lot::Mutex;

    /// Reads succeed, every write fails
    struct ReadOnlyMedium(MemoryMedium);

    impl PreferenceMedium for ReadOnlyMedium {
        fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: String) -> PersistenceResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    fn store_with(medium: MemoryMedium, supports_3d: bool) -> (Arc<SettingsStore>, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let effects = EffectsDispatcher::new(
            Arc::new(ThemeCatalog::builtin()),
            Arc::new(LanguageCatalog::builtin()),
        );
        let store = SettingsStore::boot(
            PreferenceStore::new(medium),
            effects,
            &StaticCapability(supports_3d),
            bus.clone(),
        );
        (Arc::new(store), bus)
    }

    fn english() -> MemoryMedium {
        MemoryMedium::with_entries([("langName", "\"en\"")])
    }

    #[test]
    fn test_failed_write_keeps_committed_value() {
        let bus = Arc::new(EventBus::new());
        let effects = EffectsDispatcher::new(
            Arc::new(ThemeCatalog::builtin()),
            Arc::new(LanguageCatalog::builtin()),
        );
        let store = SettingsStore::boot(
            PreferenceStore::new(ReadOnlyMedium(english())),
            effects,
            &StaticCapability(false),
            bus,
        );

        assert!(store.update_theme_name("dracula").is_ok());
        assert_eq!(store.theme_name(), "dracula");
        assert_eq!(
            store.effects().visuals().get("--color_accent").as_deref(),
            Some("#ff79c6")
        );
        assert!(store.toggle_design_tab().is_ok());
        assert!(store.show_design_tab());
    }

    #[test]
    fn test_hydrate_defers_effects() {
        let effects = EffectsDispatcher::new(
            Arc::new(ThemeCatalog::builtin()),
            Arc::new(LanguageCatalog::builtin()),
        );
        let prefs = PreferenceStore::new(MemoryMedium::with_entries([
            ("themeName", "\"godspeed\""),
            ("langName", "\"en\""),
        ]));
        let store = SettingsStore::hydrate(
            prefs,
            effects,
            &StaticCapability(false),
            Arc::new(EventBus::new()),
        );
        assert_eq!(store.theme_name(), "godspeed");
        assert!(store.effects().visuals().theme_mode().is_none());

        store.apply_effects();
        assert_eq!(
            store.effects().visuals().get("--color_accent").as_deref(),
            Some("#f0b13e")
        );
    }

    #[test]
    fn test_toggle_theme_mode_twice_restores() {
        let (store, _) = store_with(english(), false);
        let original = store.theme_mode();
        store.toggle_theme_mode().ok();
        assert_ne!(store.theme_mode(), original);
        store.toggle_theme_mode().ok();
        assert_eq!(store.theme_mode(), original);
    }

    #[test]
    fn test_toggles_flip_flags() {
        let (store, _) = store_with(english(), false);
        assert!(store.toggle_design_tab().is_ok());
        assert!(store.show_design_tab());
        assert!(store.toggle_fast_remap().is_ok());
        assert!(store.disable_fast_remap());
    }

    #[test]
    fn test_3d_rejected_without_capability() {
        let (store, _) = store_with(english(), false);
        let before = store.snapshot();

        let err = store.update_render_mode(RenderMode::ThreeD);
        assert!(matches!(err, Err(SettingsError::RenderModeUnsupported(_))));
        assert_eq!(store.snapshot(), before);
        assert_eq!(store.render_mode_options(), vec![RenderMode::TwoD]);
    }

    #[test]
    fn test_3d_accepted_with_capability() {
        let (store, _) = store_with(english(), true);
        assert!(store.update_render_mode_str("3D").is_ok());
        assert_eq!(store.render_mode(), RenderMode::ThreeD);
    }

    #[test]
    fn test_unparsable_render_mode_rejected() {
        let (store, _) = store_with(english(), true);
        assert!(matches!(
            store.update_render_mode_str("VR"),
            Err(SettingsError::InvalidSetting { .. })
        ));
        assert_eq!(store.render_mode(), RenderMode::TwoD);
    }

    #[test]
    fn test_stored_3d_degrades_without_capability() {
        let medium = MemoryMedium::with_entries([("renderMode", "\"3D\""), ("langName", "\"en\"")]);
        let (store, _) = store_with(medium, false);
        assert_eq!(store.stored_render_mode(), RenderMode::ThreeD);
        assert_eq!(store.render_mode(), RenderMode::TwoD);
    }

    #[test]
    fn test_unknown_theme_and_language_rejected() {
        let (store, _) = store_with(english(), false);
        assert!(matches!(
            store.update_theme_name("neon"),
            Err(SettingsError::UnknownTheme(_))
        ));
        assert!(matches!(
            store.update_lang_name("tlh"),
            Err(SettingsError::UnknownLanguage(_))
        ));
        assert_eq!(store.theme_name(), "olivia_dark");
        assert_eq!(store.lang_name(), "en");
    }

    #[test]
    fn test_theme_change_updates_visual_variables() {
        let (store, _) = store_with(english(), false);
        assert!(store.update_theme_name("dracula").is_ok());
        assert_eq!(
            store.effects().visuals().get("--color_accent").as_deref(),
            Some("#ff79c6")
        );
    }

    #[test]
    fn test_language_change_is_visible_immediately() {
        let (store, _) = store_with(english(), false);
        assert_eq!(store.t("language"), "Language");
        assert!(store.update_lang_name("zh-CN").is_ok());
        assert_eq!(store.t("language"), "语言");
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let (store, _) = store_with(english(), false);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            store.subscribe(move |change| seen.lock().push((tag, change.clone())));
        }

        store.update_theme_name("carbon").ok();
        let seen = seen.lock();
        let expected = SettingsChange {
            field: SettingsField::ThemeName,
            value: SettingValue::Text("carbon".to_string()),
        };
        assert_eq!(
            *seen,
            vec![("first", expected.clone()), ("second", expected)]
        );
    }

    #[test]
    fn test_listener_sees_committed_state_and_effect() {
        let (store, _) = store_with(english(), false);
        let observed = Arc::new(Mutex::new(None));

        let reader = Arc::downgrade(&store);
        let slot = observed.clone();
        store.subscribe(move |_| {
            if let Some(store) = reader.upgrade() {
                let accent = store.effects().visuals().get("--color_accent");
                *slot.lock() = Some((store.theme_name(), accent));
            }
        });

        store.update_theme_name("dark_void").ok();
        assert_eq!(
            *observed.lock(),
            Some(("dark_void".to_string(), Some("#4df2d3".to_string())))
        );
    }

    #[test]
    fn test_rejected_action_notifies_nobody() {
        let (store, bus) = store_with(english(), false);
        let changes = Arc::new(Mutex::new(0usize));
        let rejections = Arc::new(Mutex::new(0usize));

        let counter = changes.clone();
        store.subscribe(move |_| *counter.lock() += 1);
        let counter = rejections.clone();
        bus.subscribe(EventFilter::Categories(vec![EventCategory::Settings]), move |event| {
            if matches!(event, AppEvent::Settings(SettingsEvent::Rejected { .. })) {
                *counter.lock() += 1;
            }
        });

        store.update_theme_name("neon").ok();
        assert_eq!(*changes.lock(), 0);
        assert_eq!(*rejections.lock(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let (store, _) = store_with(english(), false);
        let count = Arc::new(Mutex::new(0usize));
        let counter = count.clone();
        let id = store.subscribe(move |_| *counter.lock() += 1);

        store.toggle_design_tab().ok();
        assert!(store.unsubscribe(id));
        store.toggle_design_tab().ok();
        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_options() {
        let (store, _) = store_with(english(), false);
        let themes = store.theme_options();
        assert_eq!(themes[0], SelectOption::new("olivia_dark", "olivia dark"));
        let languages = store.language_options();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[1], SelectOption::new("zh-CN", "简体中文"));
    }
}
