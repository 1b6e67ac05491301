//! Global menu
//!
//! The navigation strip shown above every pane.

use serde::Serialize;

use crate::pane::PaneContext;
use crate::routes::Router;

/// Panes reachable by path but never listed in the menu
const HIDDEN_FROM_MENU: &[&str] = &["errors"];

/// Key of the pane gated by the "show design tab" setting
const DESIGN_PANE_KEY: &str = "design";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub key: String,
    pub path: String,
    pub title: String,
    pub active: bool,
}

/// Menu entries for the current settings, in registry order
pub fn menu_items(router: &Router, cx: &PaneContext, active_key: &str) -> Vec<MenuItem> {
    let show_design = cx.settings.show_design_tab();
    router
        .routes()
        .iter()
        .filter(|route| !HIDDEN_FROM_MENU.contains(&route.key))
        .filter(|route| show_design || route.key != DESIGN_PANE_KEY)
        .map(|route| MenuItem {
            key: route.key.to_string(),
            path: route.path.to_string(),
            title: cx.t(route.title_key),
            active: route.key == active_key,
        })
        .collect()
}
