//! Error handling for KeyConf
//!
//! Device errors raised while reading the selected-device state. Event bus
//! errors live next to the bus in [`crate::event_bus`].

use thiserror::Error;

/// Device error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No device is currently selected
    #[error("No device selected")]
    NoDeviceSelected,
}
