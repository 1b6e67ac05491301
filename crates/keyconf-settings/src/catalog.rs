//! Theme and language catalogs
//!
//! Read-only lookup tables consumed by the store (validation) and the
//! effects dispatcher (visual variables, translations). Both keep their
//! declaration order so option lists render in a stable order.

use std::collections::HashMap;

use crate::state::{DEFAULT_LANGUAGE, DEFAULT_THEME_NAME};

/// Cap and legend color for one key group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColor {
    /// Cap color
    pub c: String,
    /// Legend (text) color
    pub t: String,
}

impl KeyColor {
    fn new(c: &str, t: &str) -> Self {
        Self {
            c: c.to_string(),
            t: t.to_string(),
        }
    }
}

/// Colors of a keycap theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub accent: KeyColor,
    pub modifier: KeyColor,
    pub alpha: KeyColor,
}

impl ThemeColors {
    /// Visual variables written when this theme is applied
    pub fn variables(&self) -> Vec<(String, String)> {
        vec![
            ("--color_accent".to_string(), self.accent.c.clone()),
            ("--color_inside-accent".to_string(), self.accent.t.clone()),
            ("--color_mod".to_string(), self.modifier.c.clone()),
            ("--color_inside-mod".to_string(), self.modifier.t.clone()),
            ("--color_alpha".to_string(), self.alpha.c.clone()),
            ("--color_inside-alpha".to_string(), self.alpha.t.clone()),
        ]
    }
}

/// Ordered theme name -> colors table
#[derive(Debug, Clone, Default)]
pub struct ThemeCatalog {
    themes: Vec<(String, ThemeColors)>,
}

impl ThemeCatalog {
    /// Build a catalog from `(name, colors)` pairs; later duplicates are ignored
    pub fn new(entries: impl IntoIterator<Item = (String, ThemeColors)>) -> Self {
        let mut themes: Vec<(String, ThemeColors)> = Vec::new();
        for (name, colors) in entries {
            if themes.iter().any(|(existing, _)| *existing == name) {
                tracing::warn!(theme = %name, "Duplicate theme ignored");
                continue;
            }
            themes.push((name, colors));
        }
        Self { themes }
    }

    /// The themes shipped with the application
    pub fn builtin() -> Self {
        let theme = |name: &str, accent: (&str, &str), modifier: (&str, &str), alpha: (&str, &str)| {
            (
                name.to_string(),
                ThemeColors {
                    accent: KeyColor::new(accent.0, accent.1),
                    modifier: KeyColor::new(modifier.0, modifier.1),
                    alpha: KeyColor::new(alpha.0, alpha.1),
                },
            )
        };

        Self::new([
            theme(
                DEFAULT_THEME_NAME,
                ("#e8c4b8", "#363434"),
                ("#363434", "#e8c4b8"),
                ("#363434", "#e8c4b8"),
            ),
            theme(
                "olivia_light",
                ("#363434", "#e8c4b8"),
                ("#e8c4b8", "#363434"),
                ("#f0f0f0", "#363434"),
            ),
            theme(
                "dark_void",
                ("#4df2d3", "#0a0a0a"),
                ("#1c1c1c", "#4df2d3"),
                ("#0a0a0a", "#d6d6d6"),
            ),
            theme(
                "godspeed",
                ("#f0b13e", "#2a4d6e"),
                ("#a5bfd6", "#2a4d6e"),
                ("#f5e6c8", "#2a4d6e"),
            ),
            theme(
                "dracula",
                ("#ff79c6", "#282a36"),
                ("#44475a", "#f8f8f2"),
                ("#282a36", "#f8f8f2"),
            ),
            theme(
                "carbon",
                ("#f07b2f", "#1f1f1f"),
                ("#5a5a5a", "#f0f0f0"),
                ("#c8c8c8", "#1f1f1f"),
            ),
            theme(
                "modern_dolch",
                ("#d14d4d", "#f2f2f2"),
                ("#3e4a59", "#d9d9d9"),
                ("#6a7686", "#f2f2f2"),
            ),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&ThemeColors> {
        self.themes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, colors)| colors)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Theme names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Human label for a theme name (`dark_void` -> `dark void`)
    pub fn display_label(name: &str) -> String {
        name.replace('_', " ")
    }
}

/// A UI language with its translation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Label shown in the language selector, in the language itself
    pub label: String,
    /// Translation key -> text
    pub strings: HashMap<String, String>,
}

/// Ordered language code -> language table
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: Vec<(String, Language)>,
}

impl LanguageCatalog {
    pub fn new(entries: impl IntoIterator<Item = (String, Language)>) -> Self {
        let mut languages: Vec<(String, Language)> = Vec::new();
        for (code, language) in entries {
            if languages.iter().any(|(existing, _)| *existing == code) {
                tracing::warn!(language = %code, "Duplicate language ignored");
                continue;
            }
            languages.push((code, language));
        }
        Self { languages }
    }

    /// The languages shipped with the application
    pub fn builtin() -> Self {
        Self::new([
            (
                DEFAULT_LANGUAGE.to_string(),
                Language {
                    label: "English".to_string(),
                    strings: parse_strings("en", include_str!("../locales/en.json")),
                },
            ),
            (
                "zh-CN".to_string(),
                Language {
                    label: "简体中文".to_string(),
                    strings: parse_strings("zh-CN", include_str!("../locales/zh-CN.json")),
                },
            ),
        ])
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|(key, _)| key == code)
            .map(|(_, language)| language)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// `(code, label)` pairs in declaration order
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages
            .iter()
            .map(|(code, language)| (code.as_str(), language.label.as_str()))
    }

    /// Map a requested locale onto a catalog code
    ///
    /// Tries an exact match, then a case-insensitive match, then the primary
    /// subtag (`en-US` -> `en`, `zh` -> `zh-CN`). Falls back to the default
    /// language.
    pub fn resolve<'a>(&'a self, requested: Option<&str>) -> &'a str {
        let Some(requested) = requested.map(str::trim).filter(|r| !r.is_empty()) else {
            return DEFAULT_LANGUAGE;
        };

        if let Some((code, _)) = self
            .languages
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(requested))
        {
            return code;
        }

        let primary = requested
            .split(['-', '_'])
            .next()
            .unwrap_or(requested);
        self.languages
            .iter()
            .find(|(code, _)| {
                code.split('-')
                    .next()
                    .is_some_and(|p| p.eq_ignore_ascii_case(primary))
            })
            .map(|(code, _)| code.as_str())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

fn parse_strings(code: &str, raw: &str) -> HashMap<String, String> {
    match serde_json::from_str(raw) {
        Ok(strings) => strings,
        Err(e) => {
            tracing::warn!(language = code, error = %e, "Translation table is invalid, using keys");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let catalog = ThemeCatalog::builtin();
        assert!(catalog.contains("olivia_dark"));
        assert!(catalog.contains("dark_void"));
        assert!(!catalog.contains("neon"));
        assert_eq!(catalog.names().next(), Some("olivia_dark"));
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn test_theme_variables() {
        let catalog = ThemeCatalog::builtin();
        let vars = catalog.get("dark_void").map(ThemeColors::variables);
        let vars = vars.unwrap_or_default();
        assert_eq!(vars.len(), 6);
        assert!(vars.contains(&("--color_accent".to_string(), "#4df2d3".to_string())));
    }

    #[test]
    fn test_display_label() {
        assert_eq!(ThemeCatalog::display_label("modern_dolch"), "modern dolch");
    }

    #[test]
    fn test_duplicate_theme_ignored() {
        let colors = ThemeColors {
            accent: KeyColor::new("#000", "#fff"),
            modifier: KeyColor::new("#000", "#fff"),
            alpha: KeyColor::new("#000", "#fff"),
        };
        let mut other = colors.clone();
        other.accent.c = "#111".to_string();
        let catalog = ThemeCatalog::new([
            ("a".to_string(), colors.clone()),
            ("a".to_string(), other),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a"), Some(&colors));
    }

    #[test]
    fn test_builtin_languages_have_strings() {
        let catalog = LanguageCatalog::builtin();
        let en = catalog.get("en").map(|l| l.strings.len()).unwrap_or(0);
        let zh = catalog.get("zh-CN").map(|l| l.strings.len()).unwrap_or(0);
        assert!(en > 0);
        assert_eq!(en, zh);
        let labels: Vec<_> = catalog.options().collect();
        assert_eq!(labels, vec![("en", "English"), ("zh-CN", "简体中文")]);
    }

    #[test]
    fn test_resolve_locale() {
        let catalog = LanguageCatalog::builtin();
        assert_eq!(catalog.resolve(Some("zh-CN")), "zh-CN");
        assert_eq!(catalog.resolve(Some("zh-cn")), "zh-CN");
        assert_eq!(catalog.resolve(Some("zh")), "zh-CN");
        assert_eq!(catalog.resolve(Some("en-US")), "en");
        assert_eq!(catalog.resolve(Some("en_GB")), "en");
        assert_eq!(catalog.resolve(Some("fr-FR")), "en");
        assert_eq!(catalog.resolve(Some("  ")), "en");
        assert_eq!(catalog.resolve(None), "en");
    }
}
