//! Events plugin: gives an [`App`] its bus.

use crate::host::{App, Plugin};
use shared_bus::{DiagnosticSink, EventBus};
use std::rc::Rc;
use tracing::info;

/// Installs one [`EventBus`] per application.
///
/// After installation every instance the app creates can reach the bus via
/// [`Instance::events`](crate::Instance::events), and its declared handlers
/// are subscribed on creation and removed on destruction.
#[derive(Default)]
pub struct EventsPlugin {
    sink: Option<Rc<dyn DiagnosticSink>>,
}

impl EventsPlugin {
    /// Plugin whose bus reports diagnostics through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin whose bus reports diagnostics to `sink`.
    pub fn with_sink(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self { sink: Some(sink) }
    }
}

impl Plugin for EventsPlugin {
    fn install(&self, app: &mut App) {
        let bus = match &self.sink {
            Some(sink) => EventBus::with_sink(Rc::clone(sink)),
            None => EventBus::new(),
        };
        app.provide_events(bus);
        info!(app = %app.name(), version = crate::VERSION, "Event bus installed");
    }
}
