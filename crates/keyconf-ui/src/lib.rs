//! # KeyConf UI
//!
//! Pane registry, route composition, the application shell and the
//! settings pane. Panes render to plain view models; drawing them is left
//! to the front end.

pub mod app;
pub mod menu;
pub mod pane;
pub mod panes;
pub mod registry;
pub mod routes;

pub use app::{App, AppBootOptions, BootPhase, PreferenceSource};
pub use menu::{menu_items, MenuItem};
pub use pane::{
    Control, ControlRow, Pane, PaneAction, PaneContext, PaneFactory, PaneView, ViewOption,
};
pub use panes::{ExternalPane, SettingsPane};
pub use registry::{PaneDescriptor, PaneRegistry, RegistryError, DEFAULT_PANE_KEY};
pub use routes::{normalize_location, AppShell, Route, RouteComposer, Router, ShellFrame};
