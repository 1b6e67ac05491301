//! Event type definitions for the event bus.
//!
//! This module defines all application events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Settings store events
    Settings(SettingsEvent),
    /// Selected device events
    Device(DeviceEvent),
    /// Pane navigation events
    Navigation(NavigationEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Settings(_) => EventCategory::Settings,
            AppEvent::Device(_) => EventCategory::Device,
            AppEvent::Navigation(_) => EventCategory::Navigation,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Settings(e) => e.description(),
            AppEvent::Device(e) => e.description(),
            AppEvent::Navigation(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Settings store events.
    Settings,
    /// Selected device events.
    Device,
    /// Pane navigation events.
    Navigation,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Settings => write!(f, "Settings"),
            EventCategory::Device => write!(f, "Device"),
            EventCategory::Navigation => write!(f, "Navigation"),
        }
    }
}

/// Settings store events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsEvent {
    /// In-memory state was initialized from durable storage.
    Hydrated,
    /// A setting was committed.
    Changed {
        /// Durable key of the field (e.g. `themeName`).
        field: String,
        /// New value rendered as text.
        value: String,
    },
    /// A proposed value failed validation and was not committed.
    Rejected {
        /// Durable key of the field.
        field: String,
        /// Why the value was refused.
        reason: String,
    },
}

impl SettingsEvent {
    fn description(&self) -> String {
        match self {
            SettingsEvent::Hydrated => "Settings hydrated".to_string(),
            SettingsEvent::Changed { field, value } => {
                format!("Setting '{}' changed to {}", field, value)
            }
            SettingsEvent::Rejected { field, reason } => {
                format!("Setting '{}' rejected: {}", field, reason)
            }
        }
    }
}

/// Selected device events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// A connected device became the selected device.
    Selected {
        /// Device display name.
        name: String,
        /// Reported firmware protocol version.
        protocol: u16,
    },
    /// The selection was cleared (device unplugged or deselected).
    Cleared,
}

impl DeviceEvent {
    fn description(&self) -> String {
        match self {
            DeviceEvent::Selected { name, protocol } => {
                format!("Selected {} (protocol {})", name, protocol)
            }
            DeviceEvent::Cleared => "Device selection cleared".to_string(),
        }
    }
}

/// Pane navigation events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// The shell mounted a different pane.
    Navigated {
        /// Previous location.
        from: String,
        /// Requested location.
        to: String,
        /// Key of the pane that matched.
        pane: String,
    },
}

impl NavigationEvent {
    fn description(&self) -> String {
        match self {
            NavigationEvent::Navigated { from, to, pane } => {
                format!("Navigated {} -> {} ({})", from, to, pane)
            }
        }
    }
}
