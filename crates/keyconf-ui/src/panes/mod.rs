//! Pane implementations and their factories

mod settings;

pub use settings::SettingsPane;

use crate::pane::{Pane, PaneContext, PaneView};

/// Pane whose contents are drawn entirely by the front end
///
/// The keymap editor, key tester, design loader and error log render
/// device-specific content this crate never inspects; only the title is
/// produced here.
#[derive(Debug, Clone, Copy)]
pub struct ExternalPane {
    key: &'static str,
    title_key: &'static str,
}

impl Pane for ExternalPane {
    fn key(&self) -> &'static str {
        self.key
    }

    fn render(&self, cx: &PaneContext) -> PaneView {
        PaneView::new(self.key, cx.t(self.title_key))
    }
}

pub fn configure() -> Box<dyn Pane> {
    Box::new(ExternalPane {
        key: "default",
        title_key: "configure",
    })
}

pub fn key_tester() -> Box<dyn Pane> {
    Box::new(ExternalPane {
        key: "test",
        title_key: "keyTester",
    })
}

pub fn design() -> Box<dyn Pane> {
    Box::new(ExternalPane {
        key: "design",
        title_key: "design",
    })
}

pub fn settings() -> Box<dyn Pane> {
    Box::new(SettingsPane::new())
}

pub fn errors() -> Box<dyn Pane> {
    Box::new(ExternalPane {
        key: "errors",
        title_key: "errors",
    })
}
