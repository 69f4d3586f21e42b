use crate::{
    error::{ErrorClass, ErrorOrigin},
    schema::EntityTypeDescriptor,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("entity '{0}' already registered")]
    EntityAlreadyRegistered(String),
}

impl RegistryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Conflict
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Resolver
    }
}

///
/// SchemaRegistry
///
/// Logical-name index over the entity types a store session knows.
/// Built once at session start by enumerating the store metamodel;
/// append-only after construction, so concurrent reads within a
/// session are safe even though the connection itself is not.
///

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entries: BTreeMap<String, EntityTypeDescriptor>,
}

impl SchemaRegistry {
    /// Build the registry from one metamodel enumeration.
    pub fn from_entity_types(
        types: impl IntoIterator<Item = EntityTypeDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        for descriptor in types {
            let name = descriptor.logical_name().to_string();
            if entries.insert(name.clone(), descriptor).is_some() {
                return Err(RegistryError::EntityAlreadyRegistered(name));
            }
        }

        Ok(Self { entries })
    }

    /// Look up a descriptor by logical name.
    #[must_use]
    pub fn get(&self, logical_name: &str) -> Option<&EntityTypeDescriptor> {
        self.entries.get(logical_name)
    }

    /// Iterate registered descriptors in logical-name order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityTypeDescriptor> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn descriptor(logical: &str, qualified: &str) -> EntityTypeDescriptor {
        EntityTypeDescriptor::new(logical, qualified, "id", [("id", FieldKind::Uint)])
            .expect("descriptor should build")
    }

    #[test]
    fn registry_indexes_by_logical_name() {
        let registry = SchemaRegistry::from_entity_types([
            descriptor("Person", "demo.Person"),
            descriptor("Order", "demo.Order"),
        ])
        .expect("registry should build");

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("Person").map(EntityTypeDescriptor::qualified_name),
            Some("demo.Person")
        );
        assert!(registry.get("demo.Person").is_none(), "index is by logical name");
    }

    #[test]
    fn duplicate_logical_names_are_rejected() {
        let err = SchemaRegistry::from_entity_types([
            descriptor("Person", "demo.Person"),
            descriptor("Person", "other.Person"),
        ])
        .expect_err("duplicate logical name should fail");

        assert!(matches!(err, RegistryError::EntityAlreadyRegistered(ref name) if name == "Person"));
    }
}
