//! Settings pane
//!
//! General preferences plus the diagnostics switch. Diagnostics visibility
//! is session-only pane state: it starts hidden on every mount and is
//! never persisted.

use keyconf_settings::{SettingsResult, ThemeMode};

use crate::pane::{Control, ControlRow, Pane, PaneAction, PaneContext, PaneView, ViewOption};

const SHOW_DESIGN_TAB: &str = "showDesignTab";
const FAST_KEY_MAPPING: &str = "fastKeyMapping";
const LIGHT_MODE: &str = "lightMode";
const KEYCAP_THEME: &str = "keycapTheme";
const RENDER_MODE: &str = "renderMode";
const LANGUAGE: &str = "language";
const SHOW_DIAGNOSTICS: &str = "showDiagnosticInformation";
const REQUIRES_DEVICE: &str = "requiresConnectedDevice";
const FIRMWARE_PROTOCOL: &str = "firmwareProtocol";

#[derive(Debug, Default)]
pub struct SettingsPane {
    show_diagnostics: bool,
}

impl SettingsPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics_visible(&self) -> bool {
        self.show_diagnostics
    }

    fn toggle(checked: bool) -> Control {
        Control::Toggle { checked }
    }

    fn select(options: Vec<ViewOption>, selected: &str) -> Control {
        let selected = options
            .iter()
            .find(|option| option.value == selected)
            .map(|option| option.value.clone());
        Control::Select { options, selected }
    }

    fn commit(id: &str, result: SettingsResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(control = id, error = %e, "Settings control unchanged");
                false
            }
        }
    }
}

impl Pane for SettingsPane {
    fn key(&self) -> &'static str {
        "settings"
    }

    fn render(&self, cx: &PaneContext) -> PaneView {
        let store = &cx.settings;
        let mut view = PaneView::new(self.key(), cx.t("settings"));

        let themes = store.theme_options().into_iter().map(ViewOption::from).collect();
        let render_modes = store
            .render_mode_options()
            .into_iter()
            .map(|mode| ViewOption {
                value: mode.to_string(),
                label: mode.to_string(),
            })
            .collect();
        let languages = store.language_options().into_iter().map(ViewOption::from).collect();

        view.rows = vec![
            ControlRow::new(cx, SHOW_DESIGN_TAB, Self::toggle(store.show_design_tab())),
            ControlRow::new(cx, FAST_KEY_MAPPING, Self::toggle(!store.disable_fast_remap())),
            ControlRow::new(
                cx,
                LIGHT_MODE,
                Self::toggle(store.theme_mode() == ThemeMode::Light),
            ),
            ControlRow::new(cx, KEYCAP_THEME, Self::select(themes, &store.theme_name())),
            ControlRow::new(
                cx,
                RENDER_MODE,
                Self::select(render_modes, store.render_mode().as_str()),
            ),
            ControlRow::new(cx, LANGUAGE, Self::select(languages, &store.lang_name())),
        ];

        let device = cx.devices.require_selected();
        let diagnostics = match &device {
            Ok(_) => Self::toggle(self.show_diagnostics),
            Err(_) => Control::message(cx.t(REQUIRES_DEVICE)),
        };
        view.rows.push(ControlRow::new(cx, SHOW_DIAGNOSTICS, diagnostics));

        if let (true, Ok(device)) = (self.show_diagnostics, device) {
            view.sections.push(vec![ControlRow::new(
                cx,
                FIRMWARE_PROTOCOL,
                Control::text(device.protocol_label()),
            )]);
        }

        view
    }

    fn handle(&mut self, cx: &PaneContext, action: PaneAction) -> bool {
        let store = &cx.settings;
        match action {
            PaneAction::Toggle(id) => match id.as_str() {
                SHOW_DESIGN_TAB => Self::commit(&id, store.toggle_design_tab()),
                FAST_KEY_MAPPING => Self::commit(&id, store.toggle_fast_remap()),
                LIGHT_MODE => Self::commit(&id, store.toggle_theme_mode()),
                SHOW_DIAGNOSTICS => match cx.devices.require_selected() {
                    Ok(_) => {
                        self.show_diagnostics = !self.show_diagnostics;
                        true
                    }
                    Err(e) => {
                        tracing::debug!(control = %id, error = %e, "Diagnostics unavailable");
                        false
                    }
                },
                _ => false,
            },
            PaneAction::Select { id, value } => match id.as_str() {
                KEYCAP_THEME => Self::commit(&id, store.update_theme_name(&value)),
                RENDER_MODE => Self::commit(&id, store.update_render_mode_str(&value)),
                LANGUAGE => Self::commit(&id, store.update_lang_name(&value)),
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyconf_core::{ConnectedDevice, DeviceConnectionState, EventBus};
    use keyconf_settings::{
        EffectsDispatcher, LanguageCatalog, MemoryMedium, PreferenceStore, SettingsStore,
        StaticCapability, ThemeCatalog,
    };
    use std::sync::Arc;

    fn context(supports_3d: bool) -> PaneContext {
        let bus = Arc::new(EventBus::new());
        let effects = EffectsDispatcher::new(
            Arc::new(ThemeCatalog::builtin()),
            Arc::new(LanguageCatalog::builtin()),
        );
        let prefs = PreferenceStore::new(MemoryMedium::with_entries([("langName", "\"en\"")]));
        let store = SettingsStore::boot(prefs, effects, &StaticCapability(supports_3d), bus.clone());
        PaneContext::new(Arc::new(store), Arc::new(DeviceConnectionState::new(bus)))
    }

    fn control<'a>(view: &'a PaneView, id: &str) -> Option<&'a Control> {
        view.row(id).map(|row| &row.control)
    }

    #[test]
    fn test_rows_in_order() {
        let cx = context(false);
        let view = SettingsPane::new().render(&cx);
        let ids: Vec<&str> = view.rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                SHOW_DESIGN_TAB,
                FAST_KEY_MAPPING,
                LIGHT_MODE,
                KEYCAP_THEME,
                RENDER_MODE,
                LANGUAGE,
                SHOW_DIAGNOSTICS
            ]
        );
        assert_eq!(view.title, "Settings");
        assert_eq!(view.rows[0].label, "Show Design tab");
    }

    #[test]
    fn test_fast_remap_shown_inverted() {
        let cx = context(false);
        let mut pane = SettingsPane::new();
        assert_eq!(
            control(&pane.render(&cx), FAST_KEY_MAPPING),
            Some(&Control::Toggle { checked: true })
        );

        assert!(pane.handle(&cx, PaneAction::toggle(FAST_KEY_MAPPING)));
        assert!(cx.settings.disable_fast_remap());
        assert_eq!(
            control(&pane.render(&cx), FAST_KEY_MAPPING),
            Some(&Control::Toggle { checked: false })
        );
    }

    #[test]
    fn test_no_device_shows_message_instead_of_toggle() {
        let cx = context(false);
        let mut pane = SettingsPane::new();
        let view = pane.render(&cx);
        assert_eq!(
            control(&view, SHOW_DIAGNOSTICS),
            Some(&Control::message("Requires connected device"))
        );

        assert!(!pane.handle(&cx, PaneAction::toggle(SHOW_DIAGNOSTICS)));
        assert!(!pane.diagnostics_visible());
        assert!(pane.render(&cx).sections.is_empty());
    }

    #[test]
    fn test_diagnostics_with_device() {
        let cx = context(false);
        cx.devices.select(ConnectedDevice::new("Zeal60", 0x5241_0060, 11));
        let mut pane = SettingsPane::new();

        let view = pane.render(&cx);
        assert_eq!(
            control(&view, SHOW_DIAGNOSTICS),
            Some(&Control::Toggle { checked: false })
        );
        assert!(view.sections.is_empty());

        assert!(pane.handle(&cx, PaneAction::toggle(SHOW_DIAGNOSTICS)));
        let view = pane.render(&cx);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0][0].control, Control::text("11"));
        assert_eq!(view.sections[0][0].label, "Firmware Protocol");

        cx.devices.clear();
        let view = pane.render(&cx);
        assert!(view.sections.is_empty());
    }

    #[test]
    fn test_render_mode_options_follow_capability() {
        let cx = context(false);
        let mut pane = SettingsPane::new();
        let Some(Control::Select { options, selected }) =
            control(&pane.render(&cx), RENDER_MODE).cloned()
        else {
            panic!("render mode row should be a select");
        };
        assert_eq!(options.len(), 1);
        assert_eq!(selected.as_deref(), Some("2D"));

        assert!(!pane.handle(&cx, PaneAction::select(RENDER_MODE, "3D")));
        assert_eq!(cx.settings.render_mode().as_str(), "2D");

        let cx = context(true);
        let view = pane.render(&cx);
        let Some(Control::Select { options, .. }) = control(&view, RENDER_MODE) else {
            panic!("render mode row should be a select");
        };
        assert_eq!(options.len(), 2);
        assert!(pane.handle(&cx, PaneAction::select(RENDER_MODE, "3D")));
    }

    #[test]
    fn test_language_switch_relabels_rows() {
        let cx = context(false);
        let mut pane = SettingsPane::new();
        assert!(pane.handle(&cx, PaneAction::select(LANGUAGE, "zh-CN")));
        let view = pane.render(&cx);
        assert_eq!(view.title, "设置");
        assert_eq!(view.row(LANGUAGE).map(|row| row.label.as_str()), Some("语言"));
    }

    #[test]
    fn test_unknown_theme_leaves_selection() {
        let cx = context(false);
        let mut pane = SettingsPane::new();
        assert!(!pane.handle(&cx, PaneAction::select(KEYCAP_THEME, "neon")));
        let Some(Control::Select { selected, .. }) = control(&pane.render(&cx), KEYCAP_THEME).cloned()
        else {
            panic!("theme row should be a select");
        };
        assert_eq!(selected.as_deref(), Some("olivia_dark"));
    }
}
