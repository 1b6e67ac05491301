//! # KeyConf Core
//!
//! Core types and utilities for KeyConf.
//! Provides the device error type, the session event bus and the selected-device
//! state shared by the settings and UI crates.

pub mod device;
pub mod error;
pub mod event_bus;

pub use device::{ConnectedDevice, DeviceConnectionState};

pub use error::DeviceError;

// Re-export event bus for convenience
pub use event_bus::{
    AppEvent, DeviceEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter,
    NavigationEvent, SettingsEvent, SubscriptionId,
};
