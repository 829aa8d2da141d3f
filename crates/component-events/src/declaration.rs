//! # Handler Declarations
//!
//! A component type declares, per event name, how it wants to be notified:
//!
//! | Shape      | Meaning                                                    |
//! |------------|------------------------------------------------------------|
//! | `Callback` | a function called with the component and the event args    |
//! | `Method`   | the name of a method in the component's method table       |
//! | `Options`  | `{ handler, once, immediate }` wrapping one of the above   |
//!
//! Declarations loaded from data may also carry shapes that cannot be
//! subscribed at all; those are kept as `Unsupported` so the resolver can
//! report them instead of failing the load.

use shared_bus::{is_truthy, kind_of, Args, Value};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Closure handler bound to a component at subscription time.
pub type Handler<C> = Rc<dyn Fn(&mut C, &Args)>;

/// Entry of a component's method table.
pub type Method<C> = fn(&mut C, &Args);

/// Errors from building declarations out of configuration data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// The root of the declaration data is not a map of event names.
    #[error("event declarations must be an object, found {found}")]
    NotAnObject {
        /// Shape found instead.
        found: &'static str,
    },

    /// The declaration text is not valid JSON.
    #[error("invalid declaration JSON: {0}")]
    Parse(String),
}

/// Handler referenced from an options declaration.
pub enum HandlerTarget<C> {
    /// Closure handler.
    Callback(Handler<C>),
    /// Method-table name.
    Method(String),
    /// Anything else; carries the shape name for diagnostics.
    Unsupported(&'static str),
}

/// Options shape: a handler plus delivery flags.
pub struct HandlerOptions<C> {
    /// Required. `None` is reported and skipped.
    pub handler: Option<HandlerTarget<C>>,
    /// Subscribe with `once` instead of `on`.
    pub once: bool,
    /// Call the handler (with no args) right after subscribing.
    pub immediate: bool,
}

impl<C> HandlerOptions<C> {
    /// Options around `handler`, both flags off.
    pub fn new(handler: HandlerTarget<C>) -> Self {
        Self {
            handler: Some(handler),
            once: false,
            immediate: false,
        }
    }

    /// Options around a method-table name.
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(HandlerTarget::Method(name.into()))
    }

    /// Options around a closure.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&mut C, &Args) + 'static,
    {
        Self::new(HandlerTarget::Callback(Rc::new(f)))
    }

    /// Options with no handler at all.
    pub fn without_handler() -> Self {
        Self {
            handler: None,
            once: false,
            immediate: false,
        }
    }

    #[must_use]
    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    #[must_use]
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }
}

/// One declared handler.
pub enum HandlerDecl<C> {
    /// Closure handler, subscribed with `on`.
    Callback(Handler<C>),
    /// Method-table name, subscribed with `on`.
    Method(String),
    /// Handler with flags.
    Options(HandlerOptions<C>),
    /// Shape that cannot be subscribed.
    Unsupported(&'static str),
}

impl<C> HandlerDecl<C> {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&mut C, &Args) + 'static,
    {
        HandlerDecl::Callback(Rc::new(f))
    }

    pub fn method(name: impl Into<String>) -> Self {
        HandlerDecl::Method(name.into())
    }

    pub fn options(options: HandlerOptions<C>) -> Self {
        HandlerDecl::Options(options)
    }

    /// Build a declaration from one configuration value.
    ///
    /// Strings name methods; objects (and arrays, which have no `handler`)
    /// are options whose flags use truthiness; every other shape is
    /// `Unsupported`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => HandlerDecl::Method(name.clone()),
            Value::Object(map) => {
                let handler = map.get("handler").and_then(|h| match h {
                    // Falsy handlers count as absent.
                    h if !is_truthy(h) => None,
                    Value::String(name) => Some(HandlerTarget::Method(name.clone())),
                    other => Some(HandlerTarget::Unsupported(kind_of(other))),
                });
                HandlerDecl::Options(HandlerOptions {
                    handler,
                    once: map.get("once").is_some_and(is_truthy),
                    immediate: map.get("immediate").is_some_and(is_truthy),
                })
            }
            Value::Array(_) => HandlerDecl::Options(HandlerOptions::without_handler()),
            other => HandlerDecl::Unsupported(kind_of(other)),
        }
    }

    /// Shape name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerDecl::Callback(_) => "callback",
            HandlerDecl::Method(_) => "method",
            HandlerDecl::Options(_) => "options",
            HandlerDecl::Unsupported(kind) => *kind,
        }
    }
}

impl<C> fmt::Debug for HandlerDecl<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDecl::Callback(_) => f.write_str("Callback(..)"),
            HandlerDecl::Method(name) => f.debug_tuple("Method").field(name).finish(),
            HandlerDecl::Options(opts) => f
                .debug_struct("Options")
                .field("handler", &opts.handler.as_ref().map(target_kind))
                .field("once", &opts.once)
                .field("immediate", &opts.immediate)
                .finish(),
            HandlerDecl::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

fn target_kind<C>(target: &HandlerTarget<C>) -> &'static str {
    match target {
        HandlerTarget::Callback(_) => "callback",
        HandlerTarget::Method(_) => "method",
        HandlerTarget::Unsupported(kind) => *kind,
    }
}

/// Ordered map from event name to declaration.
///
/// Re-declaring a name replaces the earlier declaration but keeps its
/// position, so the last declaration for a name silently wins.
pub struct EventDeclarations<C> {
    entries: Vec<(String, HandlerDecl<C>)>,
}

impl<C> EventDeclarations<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn on(mut self, event: impl Into<String>, decl: HandlerDecl<C>) -> Self {
        self.insert(event, decl);
        self
    }

    /// Declare `decl` for `event`, replacing any earlier declaration.
    pub fn insert(&mut self, event: impl Into<String>, decl: HandlerDecl<C>) {
        let event = event.into();
        match self.entries.iter_mut().find(|(name, _)| *name == event) {
            Some((_, slot)) => *slot = decl,
            None => self.entries.push((event, decl)),
        }
    }

    pub fn get(&self, event: &str) -> Option<&HandlerDecl<C>> {
        self.entries
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, decl)| decl)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HandlerDecl<C>)> {
        self.entries.iter().map(|(name, decl)| (name.as_str(), decl))
    }

    /// Declarations from a configuration object such as
    /// `{"greet": "say_hello", "tick": {"handler": "refresh", "once": true}}`.
    ///
    /// Entries keep the order the keys were written in.
    pub fn from_json(value: &Value) -> Result<Self, DeclarationError> {
        let Value::Object(map) = value else {
            return Err(DeclarationError::NotAnObject {
                found: kind_of(value),
            });
        };

        let mut declarations = Self::new();
        for (event, decl) in map {
            declarations.insert(event.clone(), HandlerDecl::from_value(decl));
        }
        Ok(declarations)
    }

    /// Parse JSON text and build declarations from it.
    pub fn from_json_str(text: &str) -> Result<Self, DeclarationError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DeclarationError::Parse(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Append every declaration of `other`, later ones winning.
    #[must_use]
    pub fn merge(mut self, other: EventDeclarations<C>) -> Self {
        for (event, decl) in other {
            self.insert(event, decl);
        }
        self
    }
}

impl<C> Default for EventDeclarations<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventDeclarations<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<C> IntoIterator for EventDeclarations<C> {
    type Item = (String, HandlerDecl<C>);
    type IntoIter = std::vec::IntoIter<(String, HandlerDecl<C>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
