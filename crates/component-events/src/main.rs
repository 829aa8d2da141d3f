//! # Component Events Demo
//!
//! Builds a tiny application with two components wired only through the bus:
//!
//! - `Toolbar` emits `status:update` when "clicked".
//! - `StatusLine` declares its handlers in JSON and reacts to them.
//!
//! Run with `EVENTS_LOG_LEVEL=debug` to watch subscriptions being set up and
//! torn down.

use anyhow::{Context, Result};
use component_events::{
    args, App, Args, Component, EventBus, EventDeclarations, EventPublisher, EventsPlugin, Method,
};
use events_telemetry::{init_logging, TelemetryConfig};
use tracing::{info, warn};

/// Handler declarations for [`StatusLine`], as they would ship in a config file.
///
/// `status:flash` names a method that does not exist and is reported at
/// creation time.
const STATUS_LINE_EVENTS: &str = r#"{
    "status:update": "set_text",
    "status:clear": { "handler": "clear", "immediate": true },
    "app:ready": { "handler": "ready", "once": true },
    "status:flash": "flash"
}"#;

#[derive(Default)]
struct StatusLine {
    text: String,
    updates: u32,
    ready: bool,
}

impl StatusLine {
    fn set_text(&mut self, args: &Args) {
        self.text = args
            .first()
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        self.updates += 1;
    }

    fn clear(&mut self, _args: &Args) {
        self.text.clear();
    }

    fn ready(&mut self, _args: &Args) {
        self.ready = true;
    }
}

impl Component for StatusLine {
    fn events() -> EventDeclarations<Self> {
        EventDeclarations::from_json_str(STATUS_LINE_EVENTS).unwrap_or_else(|e| {
            warn!(error = %e, "StatusLine declarations ignored");
            EventDeclarations::new()
        })
    }

    fn method(name: &str) -> Option<Method<Self>> {
        match name {
            "set_text" => Some(Self::set_text),
            "clear" => Some(Self::clear),
            "ready" => Some(Self::ready),
            _ => None,
        }
    }
}

/// Owns no handlers; it only emits through the bus it is given.
#[derive(Default)]
struct Toolbar {
    events: Option<EventBus>,
}

impl Toolbar {
    fn click(&self, label: &str) {
        match &self.events {
            Some(events) => events.emit("status:update", &args![label]),
            None => warn!(label, "Toolbar has no event bus"),
        }
    }
}

impl Component for Toolbar {
    fn attach_events(&mut self, events: EventBus) {
        self.events = Some(events);
    }
}

fn main() -> Result<()> {
    let config = TelemetryConfig::for_app("demo");
    init_logging(&config).context("Failed to initialize logging")?;

    let mut app = App::new("demo");
    app.use_plugin(EventsPlugin::new());

    let status = app.create(StatusLine::default());
    let toolbar = app.create(Toolbar::default());
    let bus = toolbar
        .events()
        .cloned()
        .context("events plugin not installed")?;

    bus.emit("app:ready", &[]);
    toolbar.state().click("Saved");
    toolbar.state().click("Synced");

    info!(
        text = %status.state().text,
        updates = status.state().updates,
        ready = status.state().ready,
        "Status line after updates"
    );

    let state = status.shared();
    status.destroy();
    toolbar.state().click("Ignored");

    info!(
        text = %state.borrow().text,
        listeners = bus.listener_count("status:update"),
        emitted = bus.events_emitted(),
        "Status line after destroy"
    );

    toolbar.destroy();
    Ok(())
}
