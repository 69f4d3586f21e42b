use crate::{
    error::{ErrorClass, ErrorOrigin},
    value::{Value, ValueKind},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// FieldKind
///
/// Declared type of one entity field. Deliberately a reduced scalar
/// vocabulary: it exists only to support literal compatibility checks
/// and operator validity (ordering, equality) during translation.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum FieldKind {
    Blob,
    Bool,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
}

impl FieldKind {
    #[must_use]
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Self::Blob => ValueKind::Blob,
            Self::Bool => ValueKind::Bool,
            Self::Float64 => ValueKind::Float64,
            Self::Int => ValueKind::Int,
            Self::Text => ValueKind::Text,
            Self::Timestamp => ValueKind::Timestamp,
            Self::Uint => ValueKind::Uint,
        }
    }

    /// Whether a literal's runtime kind is compatible with this field.
    /// The null marker never matches; null handling is an operator
    /// concern, not a type concern.
    #[must_use]
    pub fn matches_value(self, value: &Value) -> bool {
        value.kind() == self.value_kind()
    }

    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.value_kind().supports_ordering()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value_kind())
    }
}

///
/// EntityTypeDescriptor
///
/// Structural description of one entity type: the logical name callers
/// use, the store's own qualified type name, the identifier field, and
/// the declared field set. Immutable once constructed; owned by the
/// schema registry.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityTypeDescriptor {
    logical_name: String,
    qualified_name: String,
    id_field: String,
    fields: BTreeMap<String, FieldKind>,
}

impl EntityTypeDescriptor {
    /// Build a descriptor, validating the declared field set.
    pub fn new<N: Into<String>>(
        logical_name: impl Into<String>,
        qualified_name: impl Into<String>,
        id_field: impl Into<String>,
        fields: impl IntoIterator<Item = (N, FieldKind)>,
    ) -> Result<Self, DescriptorError> {
        let logical_name = logical_name.into();
        let qualified_name = qualified_name.into();
        let id_field = id_field.into();

        if logical_name.is_empty() {
            return Err(DescriptorError::EmptyLogicalName);
        }

        let mut declared = BTreeMap::new();
        for (name, kind) in fields {
            let name = name.into();
            if declared.insert(name.clone(), kind).is_some() {
                return Err(DescriptorError::DuplicateField {
                    entity: logical_name,
                    field: name,
                });
            }
        }

        if !declared.contains_key(&id_field) {
            return Err(DescriptorError::UnknownIdentifierField {
                entity: logical_name,
                field: id_field,
            });
        }

        Ok(Self {
            logical_name,
            qualified_name,
            id_field,
            fields: declared,
        })
    }

    #[must_use]
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

///
/// DescriptorError
///

#[derive(Debug, ThisError)]
pub enum DescriptorError {
    #[error("entity logical name must be non-empty")]
    EmptyLogicalName,

    #[error("entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("entity '{entity}' identifier field '{field}' is not a declared field")]
    UnknownIdentifierField { entity: String, field: String },
}

impl DescriptorError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Invalid
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Store
    }
}
