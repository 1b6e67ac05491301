//! Pane Registry
//!
//! The static, ordered table of navigable panes. It is built once at
//! startup, validated, and never changes afterwards.

use thiserror::Error;

use crate::pane::PaneFactory;
use crate::panes;

/// Key of the index pane, bound to the root path
pub const DEFAULT_PANE_KEY: &str = "default";

/// Errors raised by the registry startup checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Pane registry is empty")]
    Empty,

    #[error("Duplicate pane key '{0}'")]
    DuplicateKey(String),

    #[error("No pane with key 'default'")]
    MissingDefault,

    #[error("Default pane must be bound to '/', found '{0}'")]
    DefaultNotRoot(String),

    #[error("Pane '{key}' has invalid path '{path}'")]
    InvalidPath { key: String, path: String },

    #[error("Panes '{first}' and '{second}' both claim path '{path}'")]
    OverlappingPath {
        first: String,
        second: String,
        path: String,
    },
}

/// One entry of the registry
#[derive(Clone, Copy)]
pub struct PaneDescriptor {
    pub key: &'static str,
    pub path: &'static str,
    /// Declared match policy; route composition enforces `key == "default"`
    pub exact: bool,
    /// Translation key of the menu title
    pub title_key: &'static str,
    pub factory: PaneFactory,
}

impl PaneDescriptor {
    pub const fn new(
        key: &'static str,
        path: &'static str,
        title_key: &'static str,
        factory: PaneFactory,
    ) -> Self {
        Self {
            key,
            path,
            exact: false,
            title_key,
            factory,
        }
    }

    pub const fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn is_default(&self) -> bool {
        self.key == DEFAULT_PANE_KEY
    }
}

impl std::fmt::Debug for PaneDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneDescriptor")
            .field("key", &self.key)
            .field("path", &self.path)
            .field("exact", &self.exact)
            .field("title_key", &self.title_key)
            .finish_non_exhaustive()
    }
}

/// Ordered, validated pane table
#[derive(Debug, Clone)]
pub struct PaneRegistry {
    panes: Vec<PaneDescriptor>,
}

impl PaneRegistry {
    /// Validate and wrap `panes`
    pub fn new(panes: Vec<PaneDescriptor>) -> Result<Self, RegistryError> {
        Self::validate(&panes)?;
        Ok(Self { panes })
    }

    /// The application's panes
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(vec![
            PaneDescriptor::new(DEFAULT_PANE_KEY, "/", "configure", panes::configure).exact(),
            PaneDescriptor::new("test", "/test", "keyTester", panes::key_tester),
            PaneDescriptor::new("design", "/design", "design", panes::design),
            PaneDescriptor::new("settings", "/settings", "settings", panes::settings),
            PaneDescriptor::new("errors", "/errors", "errors", panes::errors),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaneDescriptor> {
        self.panes.iter()
    }

    pub fn get(&self, key: &str) -> Option<&PaneDescriptor> {
        self.panes.iter().find(|pane| pane.key == key)
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    fn validate(panes: &[PaneDescriptor]) -> Result<(), RegistryError> {
        if panes.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, pane) in panes.iter().enumerate() {
            if !pane.path.starts_with('/') {
                return Err(RegistryError::InvalidPath {
                    key: pane.key.to_string(),
                    path: pane.path.to_string(),
                });
            }

            for other in &panes[..i] {
                if other.key == pane.key {
                    return Err(RegistryError::DuplicateKey(pane.key.to_string()));
                }
                if normalize(other.path) == normalize(pane.path) {
                    return Err(RegistryError::OverlappingPath {
                        first: other.key.to_string(),
                        second: pane.key.to_string(),
                        path: pane.path.to_string(),
                    });
                }
            }

            if pane.exact != pane.is_default() {
                tracing::warn!(
                    pane = pane.key,
                    declared = pane.exact,
                    "Declared match policy overridden by route composition"
                );
            }
        }

        let default = panes
            .iter()
            .find(|pane| pane.is_default())
            .ok_or(RegistryError::MissingDefault)?;
        if normalize(default.path) != "/" {
            return Err(RegistryError::DefaultNotRoot(default.path.to_string()));
        }

        Ok(())
    }
}

/// Strip a trailing slash (except on the root)
pub(crate) fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(key: &'static str, path: &'static str) -> PaneDescriptor {
        PaneDescriptor::new(key, path, key, panes::errors)
    }

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = PaneRegistry::builtin().expect("builtin registry");
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.iter().filter(|p| p.is_default()).count(), 1);
        assert_eq!(registry.iter().next().map(|p| p.key), Some(DEFAULT_PANE_KEY));
        assert_eq!(registry.get("settings").map(|p| p.path), Some("/settings"));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(PaneRegistry::new(vec![]).err(), Some(RegistryError::Empty));
    }

    #[test]
    fn test_missing_default_rejected() {
        let result = PaneRegistry::new(vec![pane("settings", "/settings")]);
        assert_eq!(result.err(), Some(RegistryError::MissingDefault));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = PaneRegistry::new(vec![
            pane(DEFAULT_PANE_KEY, "/"),
            pane("settings", "/settings"),
            pane("settings", "/prefs"),
        ]);
        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateKey("settings".to_string()))
        );
    }

    #[test]
    fn test_overlapping_path_rejected() {
        let result = PaneRegistry::new(vec![
            pane(DEFAULT_PANE_KEY, "/"),
            pane("settings", "/settings"),
            pane("prefs", "/settings/"),
        ]);
        assert!(matches!(
            result,
            Err(RegistryError::OverlappingPath { .. })
        ));

        let result = PaneRegistry::new(vec![pane(DEFAULT_PANE_KEY, "/"), pane("home", "/")]);
        assert!(matches!(
            result,
            Err(RegistryError::OverlappingPath { .. })
        ));
    }

    #[test]
    fn test_default_must_be_root() {
        let result = PaneRegistry::new(vec![pane(DEFAULT_PANE_KEY, "/home")]);
        assert_eq!(
            result.err(),
            Some(RegistryError::DefaultNotRoot("/home".to_string()))
        );
    }

    #[test]
    fn test_relative_path_rejected() {
        let result = PaneRegistry::new(vec![pane(DEFAULT_PANE_KEY, "/"), pane("test", "test")]);
        assert!(matches!(result, Err(RegistryError::InvalidPath { .. })));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/settings/"), "/settings");
    }
}
