use crate::value::Value;
use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// NativeRow
///
/// The store's own row representation: field name → stored value.
/// A missing entry and a stored `Value::Null` are both "null" to the
/// is-null predicate.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, PartialEq, Serialize)]
pub struct NativeRow(BTreeMap<String, Value>);

impl NativeRow {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }
}

impl FromIterator<(String, Value)> for NativeRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// NativeRows
///
/// One executed result set: the logical entity name the rows belong to
/// plus the native rows, in store iteration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NativeRows {
    pub entity: String,
    pub rows: Vec<NativeRow>,
}

///
/// Record
///
/// Name/value envelope around one native row: the logical entity name
/// and the row's elements. No copying or transformation beyond the
/// envelope itself.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    entity: String,
    elements: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            elements: Vec::new(),
        }
    }

    /// Wrap a native row without transforming it.
    #[must_use]
    pub fn from_native(entity: impl Into<String>, row: NativeRow) -> Self {
        Self {
            entity: entity.into(),
            elements: row.0.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.elements.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn elements(&self) -> &[(String, Value)] {
        &self.elements
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.elements
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Unwrap the envelope back into a native row.
    #[must_use]
    pub fn into_native(self) -> NativeRow {
        self.elements.into_iter().collect()
    }
}
