//! Route composition and the application shell
//!
//! [`RouteComposer`] turns the pane registry into an ordered [`Router`].
//! Only the default pane matches exactly; every other pane matches its path
//! and anything below it. [`AppShell`] keeps the global menu around whichever
//! pane the current location resolves to.

use keyconf_core::{AppEvent, EventBus, NavigationEvent};
use serde::Serialize;
use std::sync::Arc;

use crate::menu::{menu_items, MenuItem};
use crate::pane::{Pane, PaneAction, PaneContext, PaneFactory, PaneView};
use crate::registry::{normalize, PaneRegistry, DEFAULT_PANE_KEY};

/// A composed route
#[derive(Clone, Copy)]
pub struct Route {
    pub key: &'static str,
    pub path: &'static str,
    pub exact: bool,
    pub title_key: &'static str,
    pub factory: PaneFactory,
}

impl Route {
    /// Whether `location` (already normalized) selects this route
    pub fn matches(&self, location: &str) -> bool {
        let path = normalize(self.path);
        if self.exact || path == "/" {
            return location == path;
        }
        location == path
            || location
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn mount(&self) -> Box<dyn Pane> {
        (self.factory)()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("key", &self.key)
            .field("path", &self.path)
            .field("exact", &self.exact)
            .finish_non_exhaustive()
    }
}

pub struct RouteComposer;

impl RouteComposer {
    /// One route per registry entry, in registry order
    pub fn compose(registry: &PaneRegistry) -> Router {
        let routes: Vec<Route> = registry
            .iter()
            .map(|pane| {
                let default = pane.is_default();
                Route {
                    key: pane.key,
                    path: if default { "/" } else { pane.path },
                    exact: default,
                    title_key: pane.title_key,
                    factory: pane.factory,
                }
            })
            .collect();

        // The registry guarantees a default entry
        let default_index = routes
            .iter()
            .position(|route| route.key == DEFAULT_PANE_KEY)
            .unwrap_or(0);

        tracing::debug!(routes = routes.len(), "Routes composed");
        Router {
            routes,
            default_index,
        }
    }
}

/// Ordered, first-match route table
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    default_index: usize,
}

impl Router {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn exact_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|route| route.exact)
    }

    pub fn default_route(&self) -> &Route {
        &self.routes[self.default_index]
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.key == key)
    }

    fn index_of(&self, location: &str) -> usize {
        self.routes
            .iter()
            .position(|route| route.matches(location))
            .unwrap_or(self.default_index)
    }

    /// Route for `location`; unmatched locations select the default route
    pub fn resolve(&self, location: &str) -> &Route {
        let location = normalize_location(location);
        let route = &self.routes[self.index_of(&location)];
        if !route.matches(&location) {
            tracing::debug!(location = %location, "No route matched, using default");
        }
        route
    }
}

/// Reduce a location to a bare path
///
/// Accepts `#/settings`, `settings`, `/settings/?tab=1` and the like.
pub fn normalize_location(location: &str) -> String {
    let location = location.trim();
    let location = location.strip_prefix('#').unwrap_or(location);
    let location = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let path = if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{}", location)
    };
    normalize(&path).to_string()
}

/// Everything a front end draws for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellFrame {
    pub location: String,
    pub menu: Vec<MenuItem>,
    pub pane: PaneView,
}

impl ShellFrame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Persistent chrome plus the mounted pane
pub struct AppShell {
    router: Router,
    cx: PaneContext,
    bus: Arc<EventBus>,
    location: String,
    route_index: usize,
    pane: Box<dyn Pane>,
}

impl AppShell {
    /// Mount the pane for `location`
    pub fn new(router: Router, cx: PaneContext, bus: Arc<EventBus>, location: &str) -> Self {
        let location = normalize_location(location);
        let route_index = router.index_of(&location);
        let pane = router.routes[route_index].mount();
        tracing::info!(location = %location, pane = pane.key(), "Shell mounted");

        Self {
            router,
            cx,
            bus,
            location,
            route_index,
            pane,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn context(&self) -> &PaneContext {
        &self.cx
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn current_route(&self) -> &Route {
        &self.router.routes[self.route_index]
    }

    /// Move to `location`
    ///
    /// Switching to another route drops the mounted pane and creates a fresh
    /// one. Staying on the same route keeps the mounted instance.
    pub fn navigate(&mut self, location: &str) -> &Route {
        let to = normalize_location(location);
        let from = std::mem::replace(&mut self.location, to.clone());
        let index = self.router.index_of(&to);

        if index != self.route_index {
            self.route_index = index;
            self.pane = self.router.routes[index].mount();
        }

        let pane = self.current_route().key;
        tracing::debug!(from = %from, to = %to, pane, "Navigated");
        self.bus.publish(AppEvent::Navigation(NavigationEvent::Navigated {
            from,
            to,
            pane: pane.to_string(),
        }));
        self.current_route()
    }

    /// Forward user input to the mounted pane
    pub fn dispatch(&mut self, action: PaneAction) -> bool {
        self.pane.handle(&self.cx, action)
    }

    pub fn frame(&self) -> ShellFrame {
        ShellFrame {
            location: self.location.clone(),
            menu: menu_items(&self.router, &self.cx, self.current_route().key),
            pane: self.pane.render(&self.cx),
        }
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("location", &self.location)
            .field("route", self.current_route())
            .finish_non_exhaustive()
    }
}
