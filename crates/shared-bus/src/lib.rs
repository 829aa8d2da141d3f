//! # Shared Bus - Event Bus for Component Communication
//!
//! One bus per application instance, shared by every component that wants to
//! talk to components it has no direct reference to.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Component A  │                    │ Component B  │
//! │              │     emit()         │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  on() / once()
//! ```
//!
//! ## Rules
//!
//! - **Synchronous:** `emit` calls every listener before returning.
//! - **Ordered:** listeners fire in registration order.
//! - **Global by design:** anyone holding the bus may emit or listen to any name.
//! - **Never fails the caller:** misuse is reported through a
//!   [`DiagnosticSink`] and the call becomes a no-op.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod diagnostics;
pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use events::{is_truthy, kind_of, Args, Value};
pub use publisher::{EventBus, EventPublisher};
pub use subscriber::{Callback, EventSubscriber, ListenerMode};
