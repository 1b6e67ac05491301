//! # KeyConf
//!
//! Settings and navigation core of a keyboard configuration client:
//! - Session settings store with validation, persistence and change listeners
//! - Durable preferences in a JSON or TOML file
//! - Derived effects: theme variables, active language, render modes
//! - Pane registry and first-match route table around a persistent menu
//!
//! ## Architecture
//!
//! KeyConf is organized as a workspace with multiple crates:
//!
//! 1. **keyconf-core** - Errors, event bus, device connection state
//! 2. **keyconf-settings** - Settings model, catalogs, persistence, store, config
//! 3. **keyconf-ui** - Pane registry, routes, application shell, settings pane
//! 4. **keyconf** - Main binary that integrates all crates

pub use keyconf_core::{
    AppEvent, ConnectedDevice, DeviceConnectionState, DeviceError, DeviceEvent, EventBus,
    NavigationEvent, SettingsEvent,
};

pub use keyconf_settings::{
    AppConfig, FileMedium, MemoryMedium, PreferenceStore, RenderMode, SettingsError,
    SettingsField, SettingsStore, ThemeMode,
};

pub use keyconf_ui::{App, AppBootOptions, AppShell, Control, PaneAction, ShellFrame};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout to rendered frames
/// - RUST_LOG environment variable support
/// - An optional extra directive from the application config
pub fn init_logging(filter: Option<&str>) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::filter::Directive;
    use tracing_subscriber::EnvFilter;

    let mut env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    if let Some(directive) = filter {
        env_filter = env_filter.add_directive(directive.parse::<Directive>()?);
    }

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Plain-text rendering of a frame
pub fn render_text(frame: &ShellFrame) -> String {
    let mut out = String::new();

    let menu: Vec<String> = frame
        .menu
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.title)
            } else {
                item.title.clone()
            }
        })
        .collect();
    out.push_str(&menu.join(" | "));
    out.push('\n');
    out.push_str(&format!("\n{} ({})\n", frame.pane.title, frame.location));

    let sections = std::iter::once(&frame.pane.rows).chain(frame.pane.sections.iter());
    for (i, rows) in sections.enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for row in rows {
            out.push_str(&format!("  {:<32} {}\n", row.label, describe(&row.control)));
        }
    }
    out
}

fn describe(control: &Control) -> String {
    match control {
        Control::Toggle { checked: true } => "[x]".to_string(),
        Control::Toggle { checked: false } => "[ ]".to_string(),
        Control::Select { options, selected } => options
            .iter()
            .map(|option| {
                if selected.as_deref() == Some(option.value.as_str()) {
                    format!("<{}>", option.label)
                } else {
                    option.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        Control::Message { text } => format!("({})", text),
        Control::Text { text } => text.clone(),
    }
}
