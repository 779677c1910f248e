//! Scalar value and type tag models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value in a table column
///
/// Columns may be heterogeneous: each row carries its own variant. `Null`
/// models the table container's missing-value representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Boolean
    Bool(bool),
    /// Missing value
    Null,
}

impl Value {
    /// The type tag corresponding to this value's variant
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Text(_) => TypeTag::Text,
            Value::Bool(_) => TypeTag::Bool,
            Value::Null => TypeTag::Null,
        }
    }

    /// Whether this value is the missing-value marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// Closed set of per-value type tags
///
/// Recorded at encryption time so each value can be restored to its exact
/// original variant during decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Int,
    Float,
    Text,
    Bool,
    Null,
}

impl TypeTag {
    /// Human-readable label for the tag
    pub fn label(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Text => "text",
            TypeTag::Bool => "bool",
            TypeTag::Null => "null",
        }
    }
}
