//! Selected device state
//!
//! Tracks which connected keyboard is currently selected. The connection
//! layer owns this state; the settings and pane code only read it.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::DeviceError;
use crate::event_bus::{AppEvent, DeviceEvent, EventBus};

/// A connected device as reported by the connection layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedDevice {
    /// Display name
    pub name: String,
    /// USB vendor id in the high 16 bits, product id in the low 16 bits
    pub vendor_product_id: u32,
    /// Firmware protocol version reported by the device
    pub protocol: u16,
}

impl ConnectedDevice {
    /// Create a device record
    pub fn new(name: impl Into<String>, vendor_product_id: u32, protocol: u16) -> Self {
        Self {
            name: name.into(),
            vendor_product_id,
            protocol,
        }
    }

    /// Protocol version as shown in diagnostics
    pub fn protocol_label(&self) -> String {
        self.protocol.to_string()
    }

    pub fn vendor_id(&self) -> u16 {
        (self.vendor_product_id >> 16) as u16
    }

    pub fn product_id(&self) -> u16 {
        (self.vendor_product_id & 0xFFFF) as u16
    }
}

/// Currently selected device, shared across the session
#[derive(Debug)]
pub struct DeviceConnectionState {
    selected: RwLock<Option<ConnectedDevice>>,
    bus: Arc<EventBus>,
}

impl DeviceConnectionState {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            selected: RwLock::new(None),
            bus,
        }
    }

    /// The selected device, if any
    pub fn selected(&self) -> Option<ConnectedDevice> {
        self.selected.read().clone()
    }

    /// The selected device, or an error when nothing is selected
    pub fn require_selected(&self) -> Result<ConnectedDevice, DeviceError> {
        self.selected().ok_or(DeviceError::NoDeviceSelected)
    }

    /// Select a device and announce it on the event bus
    pub fn select(&self, device: ConnectedDevice) {
        tracing::info!(device = %device.name, protocol = device.protocol, "Device selected");
        let event = DeviceEvent::Selected {
            name: device.name.clone(),
            protocol: device.protocol,
        };
        *self.selected.write() = Some(device);
        self.bus.publish(AppEvent::Device(event));
    }

    /// Clear the selection
    pub fn clear(&self) {
        let previous = self.selected.write().take();
        if let Some(device) = previous {
            tracing::info!(device = %device.name, "Device selection cleared");
            self.bus.publish(AppEvent::Device(DeviceEvent::Cleared));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::{EventCategory, EventFilter};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_no_device_by_default() {
        let state = DeviceConnectionState::new(Arc::new(EventBus::new()));
        assert!(state.selected().is_none());
        assert_eq!(state.require_selected(), Err(DeviceError::NoDeviceSelected));
    }

    #[test]
    fn test_select_and_clear_publish_events() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Device]),
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        let state = DeviceConnectionState::new(bus);
        state.select(ConnectedDevice::new("Zeal60", 0x5241_0060, 9));
        assert!(state.selected().is_some());
        assert_eq!(state.selected().map(|d| d.protocol_label()), Some("9".to_string()));

        state.clear();
        state.clear();
        assert!(state.selected().is_none());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_vendor_product_split() {
        let device = ConnectedDevice::new("Zeal60", 0x5241_0060, 9);
        assert_eq!(device.vendor_id(), 0x5241);
        assert_eq!(device.product_id(), 0x0060);
    }
}
