//! # Event Subscriber
//!
//! Defines the subscription side of the event bus: callbacks, the listener
//! entries kept in the registry, and the `on`/`once`/`off` contract.

use crate::diagnostics::DiagnosticSink;
use crate::events::Args;
use std::fmt;
use std::rc::Rc;

/// A listener callback with reference identity.
///
/// Cloning a `Callback` shares the same closure. Two callbacks compare equal
/// only when they share it, which is what `off` matches on.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Args)>);

impl Callback {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Args) + 'static,
    {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, args: &Args) {
        (self.0)(args);
    }

    /// True when both handles share one closure.
    #[must_use]
    pub fn same_as(&self, other: &Callback) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl<F> From<F> for Callback
where
    F: Fn(&Args) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

/// How long a listener stays registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerMode {
    /// Fires on every emit until removed with `off`.
    Persistent,
    /// Fires on the next emit, then removes itself.
    Once,
}

/// One entry of the listener registry.
#[derive(Debug, Clone)]
pub(crate) struct Listener {
    /// Registration id, unique per bus.
    pub(crate) id: u64,
    pub(crate) callback: Callback,
    pub(crate) mode: ListenerMode,
}

/// Trait for registering and removing listeners.
pub trait EventSubscriber {
    /// Register `callback` for every future emit of `event`.
    ///
    /// Registering the same callback twice yields two independent listeners.
    fn on(&self, event: &str, callback: Callback);

    /// Register `callback` for the next emit of `event` only.
    fn once(&self, event: &str, callback: Callback);

    /// Remove one registration of `callback` for `event`.
    ///
    /// Both arguments are required. When either is missing the call is
    /// refused with a diagnostic and no listener is touched, so a bad call can
    /// never unsubscribe everything.
    fn off(&self, event: Option<&str>, callback: Option<&Callback>);

    /// Sink used for diagnostics raised on behalf of this bus.
    fn diagnostics(&self) -> Rc<dyn DiagnosticSink>;
}
