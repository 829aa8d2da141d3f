//! # Diagnostics
//!
//! Misuse of the bus and misconfigured handler declarations never fail the
//! caller. They are reported here instead and the offending operation becomes
//! a no-op.

use std::cell::RefCell;
use thiserror::Error;
use tracing::warn;

/// A non-fatal problem detected by the bus or the subscription resolver.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `off` was called without an event name or without a callback.
    #[error("\"off\" can only be used with event and callback")]
    OffMissingArguments,

    /// The declaration for an event has a shape that cannot be subscribed.
    #[error("event handler \"{event}\" is invalid")]
    InvalidHandler {
        /// Declared event name.
        event: String,
    },

    /// An options declaration carries no `handler`.
    #[error("event handler \"{event}\" is invalid (no handler found)")]
    MissingHandler {
        /// Declared event name.
        event: String,
    },

    /// A method-name declaration names a method the component does not have.
    #[error("event handler \"{event}\" is set to inexistent method \"{method}\"")]
    MissingMethod {
        /// Declared event name.
        event: String,
        /// Method name that could not be resolved.
        method: String,
    },

    /// Delivery skipped because the component state was borrowed outside of
    /// its own handlers.
    #[error("event \"{event}\" not delivered: component state is borrowed")]
    StateBorrowed {
        /// Event being delivered.
        event: String,
    },
}

impl Diagnostic {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Diagnostic::OffMissingArguments => "off_missing_arguments",
            Diagnostic::InvalidHandler { .. } => "invalid_handler",
            Diagnostic::MissingHandler { .. } => "missing_handler",
            Diagnostic::MissingMethod { .. } => "missing_method",
            Diagnostic::StateBorrowed { .. } => "state_borrowed",
        }
    }

    /// Event name the diagnostic refers to, if any.
    pub fn event(&self) -> Option<&str> {
        match self {
            Diagnostic::OffMissingArguments => None,
            Diagnostic::InvalidHandler { event }
            | Diagnostic::MissingHandler { event }
            | Diagnostic::MissingMethod { event, .. }
            | Diagnostic::StateBorrowed { event } => Some(event),
        }
    }
}

/// Destination for diagnostics.
pub trait DiagnosticSink {
    /// Report a diagnostic. Must not panic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: every diagnostic becomes a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        warn!(
            label = diagnostic.as_label(),
            event = diagnostic.event().unwrap_or_default(),
            "[component-events] {diagnostic}"
        );
    }
}

/// Sink that keeps every diagnostic in memory and also forwards it to
/// [`TracingSink`].
///
/// Used by tests and by tooling that wants to surface configuration problems
/// after building a component tree.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    /// Drain and return everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.records.borrow_mut().drain(..).collect()
    }

    /// Number of diagnostics recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// True when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Number of recorded diagnostics carrying `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|d| d.as_label() == label)
            .count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        TracingSink.report(diagnostic);
        self.records.borrow_mut().push(diagnostic.clone());
    }
}
