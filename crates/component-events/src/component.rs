//! Component contract consumed by the subscription resolver.

use crate::declaration::{EventDeclarations, Method};
use shared_bus::EventBus;

/// A component type whose instances can subscribe to the event bus.
///
/// Every hook has an empty default, so a component with no event needs
/// nothing more than `impl Component for MyComponent {}`.
///
/// A component that emits keeps the handle given to
/// [`attach_events`](Self::attach_events); its handlers and methods can then
/// emit through it, including events the same instance listens to.
///
/// ```
/// use component_events::{Args, Component, EventDeclarations, HandlerDecl, Method};
///
/// #[derive(Default)]
/// struct Greeter {
///     greeted: u32,
/// }
///
/// impl Greeter {
///     fn say_hello(&mut self, _args: &Args) {
///         self.greeted += 1;
///     }
/// }
///
/// impl Component for Greeter {
///     fn events() -> EventDeclarations<Self> {
///         EventDeclarations::new().on("greet", HandlerDecl::method("say_hello"))
///     }
///
///     fn method(name: &str) -> Option<Method<Self>> {
///         match name {
///             "say_hello" => Some(Self::say_hello),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Component: Sized + 'static {
    /// Handler declarations shared by every instance of this type.
    ///
    /// Read once per instance, when the instance is created.
    fn events() -> EventDeclarations<Self> {
        EventDeclarations::new()
    }

    /// Method table consulted by method-name declarations.
    fn method(_name: &str) -> Option<Method<Self>> {
        None
    }

    /// Receives the application's bus when an instance is created, before
    /// its declarations are subscribed. Not called when the app has no bus.
    fn attach_events(&mut self, _events: EventBus) {}

    /// Name used in logs.
    fn component_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
