//! Renderable pane capability
//!
//! A pane turns the session context into a [`PaneView`]: a flat list of
//! labelled controls that a front end draws however it likes. Panes may keep
//! transient state of their own; it lives as long as the mounted instance.

use keyconf_core::DeviceConnectionState;
use keyconf_settings::{SelectOption, SettingsStore};
use serde::Serialize;
use std::sync::Arc;

/// Session services handed to every pane
#[derive(Debug, Clone)]
pub struct PaneContext {
    pub settings: Arc<SettingsStore>,
    pub devices: Arc<DeviceConnectionState>,
}

impl PaneContext {
    pub fn new(settings: Arc<SettingsStore>, devices: Arc<DeviceConnectionState>) -> Self {
        Self { settings, devices }
    }

    /// Translate `key` in the active language
    pub fn t(&self, key: &str) -> String {
        self.settings.t(key)
    }
}

/// A single control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    Toggle { checked: bool },
    Select { options: Vec<ViewOption>, selected: Option<String> },
    /// Explanatory text shown in place of a control
    Message { text: String },
    /// Read-only value
    Text { text: String },
}

impl Control {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Option of a [`Control::Select`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOption {
    pub value: String,
    pub label: String,
}

impl From<SelectOption> for ViewOption {
    fn from(option: SelectOption) -> Self {
        Self {
            value: option.value,
            label: option.label,
        }
    }
}

/// Label plus control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlRow {
    /// Translation key the label came from
    pub id: String,
    pub label: String,
    pub control: Control,
}

impl ControlRow {
    pub fn new(cx: &PaneContext, id: &str, control: Control) -> Self {
        Self {
            id: id.to_string(),
            label: cx.t(id),
            control,
        }
    }
}

/// Rendered output of a pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
    pub key: String,
    pub title: String,
    pub rows: Vec<ControlRow>,
    /// Secondary blocks shown under the main rows
    pub sections: Vec<Vec<ControlRow>>,
}

impl PaneView {
    pub fn new(key: &str, title: String) -> Self {
        Self {
            key: key.to_string(),
            title,
            rows: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn row(&self, id: &str) -> Option<&ControlRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// User input routed to the mounted pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneAction {
    /// Flip the toggle on row `id`
    Toggle(String),
    /// Pick `value` in the select on row `id`
    Select { id: String, value: String },
}

impl PaneAction {
    pub fn toggle(id: &str) -> Self {
        Self::Toggle(id.to_string())
    }

    pub fn select(id: &str, value: &str) -> Self {
        Self::Select {
            id: id.to_string(),
            value: value.to_string(),
        }
    }
}

/// A navigable screen
pub trait Pane: Send {
    /// Registry key of this pane
    fn key(&self) -> &'static str;

    fn render(&self, cx: &PaneContext) -> PaneView;

    /// Handle user input; returns true if anything changed
    fn handle(&mut self, _cx: &PaneContext, _action: PaneAction) -> bool {
        false
    }
}

/// Creates a fresh pane instance when its route is mounted
pub type PaneFactory = fn() -> Box<dyn Pane>;
