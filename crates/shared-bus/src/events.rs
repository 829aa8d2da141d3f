//! # Event Payloads
//!
//! An emission carries a variadic argument list. Arguments are JSON values so
//! that unrelated components can exchange data without sharing Rust types.

pub use serde_json::{json, Value};

/// Arguments delivered to listeners on `emit`.
///
/// An empty slice is a valid payload (and is what `immediate` handlers receive).
pub type Args = [Value];

/// Build an owned argument list from anything `serde_json::json!` accepts.
///
/// ```
/// use shared_bus::args;
///
/// let payload = args!["Ada", 36, { "admin": true }];
/// assert_eq!(payload.len(), 3);
/// assert_eq!(payload[0], "Ada");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::events::Value>::new()
    };
    ($($arg:tt),+ $(,)?) => {
        ::std::vec![$($crate::events::json!($arg)),+]
    };
}

/// JavaScript-style truthiness of a configuration value.
///
/// Declaration data mirrors the object-literal configuration components are
/// usually written in, so flags such as `once: 1` count as set.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Short name of a value's shape, used in diagnostics.
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
