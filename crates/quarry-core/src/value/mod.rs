mod compare;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

pub use compare::{compare_eq, compare_order};

///
/// Float64
///
/// Total-order wrapper around `f64` so values can participate in
/// `Eq`/`Ord` containers and deterministic comparisons.
///

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Float64(pub f64);

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

///
/// Value
/// Untyped literal crossing the bridge boundary.
///
/// Null → the field's value is absent (the is-null marker on `Equals`).
/// List → argument carrier only (`In`); never a stored scalar.
///
/// The derived `Ord` is the canonical storage order (cross-kind, by
/// variant tag); query-semantics comparison lives in `compare_order`.
///

#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Null,
    Blob(Vec<u8>),
    Bool(bool),
    Float64(Float64),
    Int(i64),
    List(Vec<Self>),
    Text(String),
    Timestamp(u64),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Blob(_) => ValueKind::Blob,
            Self::Bool(_) => ValueKind::Bool,
            Self::Float64(_) => ValueKind::Float64,
            Self::Int(_) => ValueKind::Int,
            Self::List(_) => ValueKind::List,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Uint(_) => ValueKind::Uint,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Float64(Float64(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Blob(bytes) => write!(f, "blob({} bytes)", bytes.len()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Float64(value) => write!(f, "{}", value.0),
            Self::Int(value) => write!(f, "{value}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Text(value) => write!(f, "'{value}'"),
            Self::Timestamp(value) => write!(f, "ts({value})"),
            Self::Uint(value) => write!(f, "{value}"),
        }
    }
}

///
/// ValueKind
///
/// Runtime classification of a literal, used for typed binding checks
/// against a field's declared kind. Deliberately smaller than a full
/// type system: it only supports compatibility and orderability gates.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueKind {
    Null,
    Blob,
    Bool,
    Float64,
    Int,
    List,
    Text,
    Timestamp,
    Uint,
}

impl ValueKind {
    /// Whether two literals of this kind admit a total order.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        match self {
            Self::Float64 | Self::Int | Self::Text | Self::Timestamp | Self::Uint => true,
            Self::Blob | Self::Bool | Self::List | Self::Null => false,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Null => "null",
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::List => "list",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
        };
        write!(f, "{label}")
    }
}
