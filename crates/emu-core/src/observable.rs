//! State inspection for drivers and output devices.
//!
//! Every printer component exposes its internal state so a front end or a
//! test can see exactly which mode the head is in. Queries never change
//! printer state.

use std::fmt;

/// A dynamically-typed value returned from a state query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Flag.
    Bool(bool),
    /// Byte-sized counter or code.
    U8(u8),
    /// Dot position or similar 16-bit quantity.
    U16(u16),
    /// Larger counters (pages written, dots emitted).
    U32(u32),
    /// Free-form text.
    String(String),
    /// A slot that has never been written.
    Unset,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v:#04X}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Unset => write!(f, "-"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Unset, Into::into)
    }
}

/// A component whose state can be inspected.
pub trait Observable {
    /// Query a specific property by path.
    ///
    /// Paths are hierarchical, separated by dots:
    /// - `head.position` - Current dot column
    /// - `mode.reverse` - Reverse printing flag
    ///
    /// Returns `None` if the path is not recognised.
    fn query(&self, path: &str) -> Option<Value>;

    /// List all available query paths.
    fn query_paths(&self) -> &'static [&'static str];
}
