//! Application boot
//!
//! Wires the session together in a fixed order: preferences are opened and
//! hydrated, derived effects applied, routes composed, and only then is the
//! first pane mounted. Theme and language are therefore correct on first
//! paint.

use keyconf_core::{DeviceConnectionState, EventBus};
use keyconf_settings::{
    detect_render_capability, AppConfig, EffectsDispatcher, FileMedium, LanguageCatalog,
    PreferenceStore, RenderCapability, SettingsStore, ThemeCatalog,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::pane::PaneContext;
use crate::registry::{PaneRegistry, RegistryError};
use crate::routes::{AppShell, RouteComposer};

/// Ordered steps of [`App::boot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    OpenPreferences,
    Hydrate,
    ApplyEffects,
    ComposeRoutes,
    Mount,
}

impl fmt::Display for BootPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenPreferences => "open-preferences",
            Self::Hydrate => "hydrate",
            Self::ApplyEffects => "apply-effects",
            Self::ComposeRoutes => "compose-routes",
            Self::Mount => "mount",
        };
        f.write_str(name)
    }
}

/// Where boot reads preferences from
#[derive(Debug)]
pub enum PreferenceSource {
    /// An already opened store
    Store(PreferenceStore),
    /// A preference file, opened during boot
    File(PathBuf),
}

impl PreferenceSource {
    /// Open the source; a file that cannot be opened yields an in-memory store
    fn open(self) -> PreferenceStore {
        match self {
            Self::Store(store) => store,
            Self::File(path) => match FileMedium::open(&path) {
                Ok(medium) => PreferenceStore::new(medium),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Cannot open preferences, changes will not be kept"
                    );
                    PreferenceStore::in_memory()
                }
            },
        }
    }
}

impl From<PreferenceStore> for PreferenceSource {
    fn from(store: PreferenceStore) -> Self {
        Self::Store(store)
    }
}

impl From<PathBuf> for PreferenceSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

pub struct AppBootOptions {
    pub preferences: PreferenceSource,
    pub capability: Box<dyn RenderCapability>,
    pub themes: ThemeCatalog,
    pub languages: LanguageCatalog,
    pub registry: Option<PaneRegistry>,
    pub initial_route: String,
}

impl AppBootOptions {
    /// Built-in catalogs and panes over `preferences`
    pub fn new(
        preferences: impl Into<PreferenceSource>,
        capability: impl RenderCapability + 'static,
    ) -> Self {
        Self {
            preferences: preferences.into(),
            capability: Box::new(capability),
            themes: ThemeCatalog::builtin(),
            languages: LanguageCatalog::builtin(),
            registry: None,
            initial_route: "/".to_string(),
        }
    }

    pub fn with_initial_route(mut self, route: impl Into<String>) -> Self {
        self.initial_route = route.into();
        self
    }

    pub fn with_registry(mut self, registry: PaneRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

impl fmt::Debug for AppBootOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBootOptions")
            .field("supports_3d", &self.capability.supports_3d())
            .field("initial_route", &self.initial_route)
            .finish_non_exhaustive()
    }
}

/// A booted session
#[derive(Debug)]
pub struct App {
    bus: Arc<EventBus>,
    settings: Arc<SettingsStore>,
    devices: Arc<DeviceConnectionState>,
    shell: AppShell,
    boot_log: Vec<BootPhase>,
}

impl App {
    pub fn boot(options: AppBootOptions) -> Result<Self, RegistryError> {
        let AppBootOptions {
            preferences,
            capability,
            themes,
            languages,
            registry,
            initial_route,
        } = options;

        let mut boot_log = Vec::new();
        let bus = Arc::new(EventBus::new());

        let preferences = preferences.open();
        boot_log.push(BootPhase::OpenPreferences);

        let effects = EffectsDispatcher::new(Arc::new(themes), Arc::new(languages));
        let settings = Arc::new(SettingsStore::hydrate(
            preferences,
            effects,
            capability.as_ref(),
            bus.clone(),
        ));
        boot_log.push(BootPhase::Hydrate);

        settings.apply_effects();
        boot_log.push(BootPhase::ApplyEffects);

        let registry = match registry {
            Some(registry) => registry,
            None => PaneRegistry::builtin()?,
        };
        let router = RouteComposer::compose(&registry);
        boot_log.push(BootPhase::ComposeRoutes);

        let devices = Arc::new(DeviceConnectionState::new(bus.clone()));
        let cx = PaneContext::new(settings.clone(), devices.clone());
        let shell = AppShell::new(router, cx, bus.clone(), &initial_route);
        boot_log.push(BootPhase::Mount);

        tracing::info!(route = shell.current_route().key, "Application booted");
        Ok(Self {
            bus,
            settings,
            devices,
            shell,
            boot_log,
        })
    }

    /// Boot with a file-backed preference store and a detected capability
    ///
    /// Preferences that cannot be located or opened fall back to an
    /// in-memory store for the session.
    pub fn boot_from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let source = match config.resolved_preferences_path() {
            Ok(path) => PreferenceSource::File(path),
            Err(e) => {
                tracing::warn!(error = %e, "No preference location, changes will not be kept");
                PreferenceSource::Store(PreferenceStore::in_memory())
            }
        };
        let capability = detect_render_capability(config.force_2d);

        let options = AppBootOptions::new(source, capability)
            .with_initial_route(config.initial_route.clone());
        Ok(Self::boot(options)?)
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn devices(&self) -> &Arc<DeviceConnectionState> {
        &self.devices
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut AppShell {
        &mut self.shell
    }

    pub fn boot_log(&self) -> &[BootPhase] {
        &self.boot_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyconf_settings::{MemoryMedium, StaticCapability};

    #[test]
    fn test_boot_phases_in_order() {
        let app = App::boot(AppBootOptions::new(
            PreferenceStore::in_memory(),
            StaticCapability(false),
        ))
        .expect("boot");
        assert_eq!(
            app.boot_log(),
            &[
                BootPhase::OpenPreferences,
                BootPhase::Hydrate,
                BootPhase::ApplyEffects,
                BootPhase::ComposeRoutes,
                BootPhase::Mount,
            ]
        );
        assert_eq!(app.shell().current_route().key, "default");
    }

    #[test]
    fn test_initial_route() {
        let options = AppBootOptions::new(
            PreferenceStore::new(MemoryMedium::new()),
            StaticCapability(true),
        )
        .with_initial_route("#/settings");
        let app = App::boot(options).expect("boot");
        assert_eq!(app.shell().current_route().key, "settings");
        assert!(app.settings().supports_3d());
    }

    #[test]
    fn test_boot_from_config_uses_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"themeName":"\"godspeed\"","langName":"\"en\""}"#)
            .expect("write preferences");

        let config = AppConfig {
            preferences_path: Some(path),
            force_2d: true,
            initial_route: "/settings".to_string(),
            ..AppConfig::default()
        };
        let app = App::boot_from_config(&config).expect("boot");
        assert_eq!(app.settings().theme_name(), "godspeed");
        assert!(!app.settings().supports_3d());
        assert_eq!(app.shell().location(), "/settings");
    }

    #[test]
    fn test_unopenable_preferences_boot_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.yaml");

        let config = AppConfig {
            preferences_path: Some(path.clone()),
            force_2d: true,
            ..AppConfig::default()
        };
        let app = App::boot_from_config(&config).expect("boot with defaults");
        assert_eq!(app.settings().theme_name(), "olivia_dark");
        assert_eq!(app.boot_log().first(), Some(&BootPhase::OpenPreferences));

        assert!(app.settings().update_theme_name("carbon").is_ok());
        assert_eq!(app.settings().theme_name(), "carbon");
        assert!(!path.exists());
    }

    #[test]
    fn test_boot_opens_preference_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.toml");

        let app = App::boot(AppBootOptions::new(path.clone(), StaticCapability(false)))
            .expect("boot");
        assert!(app.settings().toggle_design_tab().is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_boot_phase_display() {
        assert_eq!(BootPhase::ComposeRoutes.to_string(), "compose-routes");
    }
}
