//! # Component Events
//!
//! Declarative event-bus subscriptions for components.
//!
//! A component type declares which bus events it handles; the subscription
//! resolver wires those declarations to the application's bus when an
//! instance is created and removes them when it is destroyed.
//!
//! ## Usage
//!
//! ```
//! use component_events::{
//!     args, App, Args, Component, EventDeclarations, EventPublisher, EventsPlugin,
//!     HandlerDecl, HandlerOptions, Method,
//! };
//!
//! #[derive(Default)]
//! struct Badge {
//!     unread: u64,
//! }
//!
//! impl Badge {
//!     fn reset(&mut self, _args: &Args) {
//!         self.unread = 0;
//!     }
//! }
//!
//! impl Component for Badge {
//!     fn events() -> EventDeclarations<Self> {
//!         EventDeclarations::new()
//!             .on(
//!                 "mail:received",
//!                 HandlerDecl::callback(|badge: &mut Badge, args| {
//!                     badge.unread += args.first().and_then(|v| v.as_u64()).unwrap_or(1);
//!                 }),
//!             )
//!             .on(
//!                 "mail:read-all",
//!                 HandlerDecl::options(HandlerOptions::method("reset").with_immediate(true)),
//!             )
//!     }
//!
//!     fn method(name: &str) -> Option<Method<Self>> {
//!         match name {
//!             "reset" => Some(Self::reset),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut app = App::new("mail");
//! app.use_plugin(EventsPlugin::new());
//!
//! let badge = app.create(Badge::default());
//! let bus = badge.events().unwrap().clone();
//!
//! bus.emit("mail:received", &args![3]);
//! assert_eq!(badge.state().unread, 3);
//!
//! badge.destroy();
//! bus.emit("mail:received", &args![3]);
//! assert!(!bus.has_listeners("mail:received"));
//! ```

pub mod component;
pub mod declaration;
pub mod host;
pub mod plugin;
pub mod resolver;
pub mod tracker;

pub use component::Component;
pub use declaration::{
    DeclarationError, EventDeclarations, Handler, HandlerDecl, HandlerOptions, HandlerTarget,
    Method,
};
pub use host::{App, Instance, Plugin};
pub use plugin::EventsPlugin;
pub use tracker::{LifecycleState, SubscriptionTracker};

pub use shared_bus::{
    args, Args, Callback, Diagnostic, DiagnosticSink, EventBus, EventPublisher, EventSubscriber,
    RecordingSink, TracingSink, Value,
};

/// Crate version, for introspection.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
