use keyconf_core::{
    AppEvent, ConnectedDevice, DeviceConnectionState, DeviceError, DeviceEvent, EventBus,
    EventBusConfig, EventCategory, EventFilter,
};
use std::sync::{Arc, Mutex};

#[test]
fn test_device_lifecycle_on_bus() {
    let bus = Arc::new(EventBus::with_config(EventBusConfig {
        enable_history: true,
        ..EventBusConfig::default()
    }));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Device]),
        move |event| sink.lock().expect("sink lock").push(event),
    );

    let devices = DeviceConnectionState::new(bus.clone());
    assert_eq!(devices.require_selected().err(), Some(DeviceError::NoDeviceSelected));

    devices.select(ConnectedDevice::new("Zeal60", 0x5241_0060, 11));
    assert_eq!(devices.require_selected().map(|d| d.protocol), Ok(11));
    devices.clear();
    devices.clear();

    let events = seen.lock().expect("sink lock").clone();
    assert_eq!(
        events,
        vec![
            AppEvent::Device(DeviceEvent::Selected {
                name: "Zeal60".to_string(),
                protocol: 11,
            }),
            AppEvent::Device(DeviceEvent::Cleared),
        ]
    );
    assert_eq!(bus.history(None).len(), 2);
}
