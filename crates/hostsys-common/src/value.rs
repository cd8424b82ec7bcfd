//! Host value model.
//!
//! The calling environment hands operations tagged values and expects tagged
//! values back. Strings arrive as sequences of Unicode code points and must be
//! decoded into native strings before they can reach the OS; that decoding is a
//! collaborator ([`TextDecoder`]) so hosts with their own allocator can plug in.

use crate::errors::{SystemError, SystemResult};
use std::fmt;

/// Text as the host stores it: a sequence of Unicode code points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostText(Vec<char>);

impl HostText {
    /// Encodes a native string into host text, reporting allocation failure.
    pub fn from_native(text: &str) -> SystemResult<Self> {
        let count = text.chars().count();
        let mut codepoints = Vec::new();
        codepoints
            .try_reserve_exact(count)
            .map_err(|_| SystemError::allocation("building a host string"))?;
        codepoints.extend(text.chars());
        Ok(Self(codepoints))
    }

    pub fn codepoints(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for HostText {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

impl From<String> for HostText {
    fn from(s: String) -> Self {
        Self(s.chars().collect())
    }
}

impl From<Vec<char>> for HostText {
    fn from(codepoints: Vec<char>) -> Self {
        Self(codepoints)
    }
}

impl fmt::Display for HostText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// A value exchanged with the calling environment.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Number(f64),
    String(HostText),
    List(Vec<Value>),
}

impl Value {
    /// Builds a number value.
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    /// Builds a string value from native text, reporting allocation failure.
    pub fn string(text: &str) -> SystemResult<Self> {
        HostText::from_native(text).map(Value::String)
    }

    /// Name of the value's type as the host spells it in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "List",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&HostText> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(HostText::from(s))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(text) => write!(f, "'{}'", text),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Decodes host text into a native string.
///
/// Implementations must report resource exhaustion as
/// [`SystemError::Allocation`] rather than aborting.
pub trait TextDecoder {
    fn decode(&self, text: &HostText) -> SystemResult<String>;
}

/// Decoder that UTF-8 encodes host code points into a fallibly reserved buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointDecoder;

impl TextDecoder for CodepointDecoder {
    fn decode(&self, text: &HostText) -> SystemResult<String> {
        let size: usize = text.codepoints().iter().map(|c| c.len_utf8()).sum();
        let mut native = String::new();
        native
            .try_reserve_exact(size)
            .map_err(|_| SystemError::allocation("decoding a host string"))?;
        native.extend(text.codepoints());
        Ok(native)
    }
}
