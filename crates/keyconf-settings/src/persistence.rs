//! Preference Persistence
//!
//! Durable key/value storage for the managed settings. The host medium is
//! abstracted behind [`PreferenceMedium`]; [`PreferenceStore`] layers the
//! field-level contract on top of it: reads never fail (absent or corrupt
//! entries mean "use the default") and writes are best-effort.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::{LanguageCatalog, ThemeCatalog};
use crate::error::{PersistenceError, PersistenceResult};
use crate::state::{SettingValue, SettingsField, SettingsState};

/// Host key/value durable medium
///
/// Values are JSON-encoded strings, mirroring browser-style local storage.
pub trait PreferenceMedium: Send {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Store `value` under `key`
    fn set(&mut self, key: &str, value: String) -> PersistenceResult<()>;
}

/// Volatile medium, for tests and for sessions with no writable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    entries: BTreeMap<String, String>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceMedium for MemoryMedium {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> PersistenceResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> PersistenceResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(PersistenceError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Single-file medium (JSON or TOML)
///
/// The file is read synchronously when opened and the whole map is
/// rewritten on every `set`.
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
    format: FileFormat,
    entries: BTreeMap<String, String>,
}

impl FileMedium {
    /// Open the medium at `path`
    ///
    /// A missing file opens empty. An unreadable or malformed file also
    /// opens empty (and is overwritten by the next save); only an
    /// unsupported extension is an error.
    pub fn open(path: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        let entries = match Self::read_entries(&path, format) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Preference file unreadable, starting empty");
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "Preference file opened");
        Ok(Self {
            path,
            format,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path, format: FileFormat) -> PersistenceResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        let entries = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        Ok(entries)
    }

    fn write_entries(&self) -> PersistenceResult<()> {
        let content = match self.format {
            FileFormat::Json => serde_json::to_string_pretty(&self.entries)?,
            FileFormat::Toml => toml::to_string_pretty(&self.entries)?,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceMedium for FileMedium {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> PersistenceResult<()> {
        self.entries.insert(key.to_string(), value);
        self.write_entries()
    }
}

/// Field-level preference store
pub struct PreferenceStore {
    medium: Mutex<Box<dyn PreferenceMedium>>,
}

impl PreferenceStore {
    pub fn new(medium: impl PreferenceMedium + 'static) -> Self {
        Self {
            medium: Mutex::new(Box::new(medium)),
        }
    }

    /// Store backed by a [`MemoryMedium`]
    pub fn in_memory() -> Self {
        Self::new(MemoryMedium::new())
    }

    /// Load one field
    ///
    /// Returns `None` when the entry is absent, the medium fails, or the
    /// stored text does not decode to a value of the field's kind.
    pub fn load(&self, field: SettingsField) -> Option<SettingValue> {
        let raw = match self.medium.lock().get(field.key()) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(field = %field, error = %e, "Preference read failed, using default");
                return None;
            }
        };

        let decoded = serde_json::from_str::<Value>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|json| SettingValue::from_json(field, &json).map_err(|e| e.to_string()));

        match decoded {
            Ok(value) => Some(value),
            Err(reason) => {
                let err = PersistenceError::Corrupted {
                    key: field.key().to_string(),
                    reason,
                };
                tracing::warn!(error = %err, "Ignoring stored preference");
                None
            }
        }
    }

    /// Save one field, best-effort
    ///
    /// Failures are logged and dropped; the caller's in-memory state stays
    /// authoritative for the session.
    pub fn save(&self, field: SettingsField, value: &SettingValue) {
        let encoded = value.to_json().to_string();
        if let Err(e) = self.medium.lock().set(field.key(), encoded) {
            tracing::warn!(field = %field, error = %e, "Preference write failed");
        } else {
            tracing::debug!(field = %field, value = %value, "Preference saved");
        }
    }

    /// Build the boot-time state from stored preferences
    ///
    /// Starts from built-in defaults and overlays every field that loads.
    /// Stored theme or language names missing from the catalogs are
    /// ignored. With no stored language the system locale is tried.
    pub fn hydrate(&self, themes: &ThemeCatalog, languages: &LanguageCatalog) -> SettingsState {
        let mut state = SettingsState::default();

        for field in SettingsField::ALL {
            let Some(value) = self.load(field) else {
                continue;
            };
            let known = match (field, &value) {
                (SettingsField::ThemeName, SettingValue::Text(name)) => themes.contains(name),
                (SettingsField::LangName, SettingValue::Text(code)) => languages.contains(code),
                _ => true,
            };
            if !known {
                tracing::warn!(field = %field, value = %value, "Stored value not in catalog, using default");
                continue;
            }
            state.set(field, value);
        }

        if self.load(SettingsField::LangName).is_none() {
            let system = sys_locale::get_locale();
            state.lang_name = languages.resolve(system.as_deref()).to_string();
            tracing::debug!(system = ?system, resolved = %state.lang_name, "Language from system locale");
        }

        state
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}
