//! # Event Publisher
//!
//! Defines the publishing side of the event bus and the in-process bus itself.
//!
//! Delivery is synchronous: `emit` returns once every listener has returned.
//! A panic inside a listener propagates out of `emit` and the remaining
//! listeners for that emission are not called.

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::events::Args;
use crate::subscriber::{Callback, EventSubscriber, Listener, ListenerMode};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Trait for publishing events to the bus.
pub trait EventPublisher {
    /// Deliver `args` to every listener currently registered for `event`,
    /// in registration order.
    fn emit(&self, event: &str, args: &Args);

    /// Get the total number of emits, including those nobody listened to.
    fn events_emitted(&self) -> u64;
}

/// Shared publish/subscribe channel for one application.
///
/// Cloning yields another handle to the same registry. The bus is
/// single-threaded: it is neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

struct BusInner {
    /// Listeners by event name, oldest registration first.
    listeners: RefCell<HashMap<String, Vec<Listener>>>,

    /// Next registration id.
    next_id: Cell<u64>,

    /// Total events emitted.
    events_emitted: Cell<u64>,

    /// Where misuse is reported.
    sink: Rc<dyn DiagnosticSink>,
}

impl EventBus {
    /// Create a bus reporting diagnostics through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Rc::new(TracingSink))
    }

    /// Create a bus reporting diagnostics to `sink`.
    #[must_use]
    pub fn with_sink(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            inner: Rc::new(BusInner {
                listeners: RefCell::new(HashMap::new()),
                next_id: Cell::new(0),
                events_emitted: Cell::new(0),
                sink,
            }),
        }
    }

    /// Number of listeners registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner
            .listeners
            .borrow()
            .get(event)
            .map_or(0, Vec::len)
    }

    /// True when at least one listener is registered for `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Event names with at least one listener, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.listeners.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// True when both handles refer to the same bus.
    #[must_use]
    pub fn same_bus(&self, other: &EventBus) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn register(&self, event: &str, callback: Callback, mode: ListenerMode) {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        self.inner
            .listeners
            .borrow_mut()
            .entry(event.to_owned())
            .or_default()
            .push(Listener { id, callback, mode });

        debug!(event = %event, mode = ?mode, "Listener registered");
    }

    /// Remove the listener with registration `id`. Returns false if it is gone.
    fn remove_listener(&self, event: &str, id: u64) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(event) else {
            return false;
        };
        let Some(pos) = list.iter().position(|l| l.id == id) else {
            return false;
        };

        list.remove(pos);
        if list.is_empty() {
            listeners.remove(event);
        }
        true
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.event_names())
            .field("events_emitted", &self.events_emitted())
            .finish_non_exhaustive()
    }
}

impl EventPublisher for EventBus {
    fn emit(&self, event: &str, args: &Args) {
        self.inner
            .events_emitted
            .set(self.inner.events_emitted.get() + 1);

        // Listeners registered during delivery wait for the next emit.
        let snapshot: Vec<Listener> = match self.inner.listeners.borrow().get(event) {
            Some(list) => list.clone(),
            None => {
                trace!(event = %event, "Event emitted with no listeners");
                return;
            }
        };

        debug!(event = %event, listeners = snapshot.len(), "Event emitted");

        for listener in snapshot {
            // A once-listener consumed by a nested emit must not fire again.
            if listener.mode == ListenerMode::Once && !self.remove_listener(event, listener.id) {
                continue;
            }
            listener.callback.call(args);
        }
    }

    fn events_emitted(&self) -> u64 {
        self.inner.events_emitted.get()
    }
}

impl EventSubscriber for EventBus {
    fn on(&self, event: &str, callback: Callback) {
        self.register(event, callback, ListenerMode::Persistent);
    }

    fn once(&self, event: &str, callback: Callback) {
        self.register(event, callback, ListenerMode::Once);
    }

    fn off(&self, event: Option<&str>, callback: Option<&Callback>) {
        let (Some(event), Some(callback)) = (event.filter(|e| !e.is_empty()), callback) else {
            self.inner.sink.report(&Diagnostic::OffMissingArguments);
            return;
        };

        let mut listeners = self.inner.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(event) else {
            return;
        };

        // Newest matching registration goes first.
        if let Some(pos) = list.iter().rposition(|l| l.callback == *callback) {
            let removed = list.remove(pos);
            debug!(event = %event, mode = ?removed.mode, "Listener removed");
        }
        if list.is_empty() {
            listeners.remove(event);
        }
    }

    fn diagnostics(&self) -> Rc<dyn DiagnosticSink> {
        Rc::clone(&self.inner.sink)
    }
}
