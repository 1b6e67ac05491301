//! # Event Bus Module
//!
//! Provides a unified event bus system for decoupled communication between
//! application components.
//!
//! ## Overview
//!
//! The event bus enables publish/subscribe patterns across the application:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Synchronous handlers are notified after commit, in registration order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keyconf_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, SettingsEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Settings]),
//!     |event| {
//!         if let AppEvent::Settings(change) = event {
//!             println!("Settings event: {:?}", change);
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::Settings(SettingsEvent::Hydrated));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
