use crate::{
    error::{ErrorClass, ErrorOrigin},
    schema::{EntityTypeDescriptor, SchemaRegistry},
    store::{StoreConnection, StoreError},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    /// Neither the store metamodel nor the registry cache knows the
    /// logical name. The primary lookup failure rides along as the
    /// source for diagnostics.
    #[error("entity '{name}' not found in the list of known entities")]
    EntityNotFound {
        name: String,
        #[source]
        source: StoreError,
    },

    /// A store failure unrelated to naming; never recovered locally.
    #[error(transparent)]
    Store(StoreError),
}

impl ResolveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::EntityNotFound { .. } => ErrorClass::NotFound,
            Self::Store(err) => err.class(),
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::EntityNotFound { .. } => ErrorOrigin::Resolver,
            Self::Store(err) => err.origin(),
        }
    }
}

///
/// EntityResolver
///
/// Two-stage lookup from logical entity name to type descriptor.
/// Primary: the store's own metamodel lookup, which may require the
/// store's naming convention (qualified names). Fallback: the session
/// registry, indexed by logical name at session start. The fallback is
/// the one deliberate local recovery in the engine.
///

pub struct EntityResolver<'a, S: StoreConnection> {
    store: &'a S,
    registry: &'a SchemaRegistry,
}

impl<'a, S: StoreConnection> EntityResolver<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S, registry: &'a SchemaRegistry) -> Self {
        Self { store, registry }
    }

    pub fn resolve(&self, logical_name: &str) -> Result<EntityTypeDescriptor, ResolveError> {
        let primary_failure = match self.store.metamodel_lookup(logical_name) {
            Ok(descriptor) => return Ok(descriptor),
            // Only a naming miss falls through to the cache.
            Err(err @ StoreError::UnknownEntityType { .. }) => err,
            Err(err) => return Err(ResolveError::Store(err)),
        };

        if let Some(descriptor) = self.registry.get(logical_name) {
            debug!(
                entity = logical_name,
                "metamodel lookup missed; resolved via registry cache"
            );
            return Ok(descriptor.clone());
        }

        Err(ResolveError::EntityNotFound {
            name: logical_name.to_string(),
            source: primary_failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::FieldKind,
        store::memory::MemoryStore,
    };
    use std::error::Error as _;

    fn descriptor(logical: &str, qualified: &str) -> EntityTypeDescriptor {
        EntityTypeDescriptor::new(logical, qualified, "id", [("id", FieldKind::Uint)])
            .expect("descriptor should build")
    }

    fn fixture() -> (MemoryStore, SchemaRegistry) {
        let mut store = MemoryStore::new("test-unit");
        store
            .define_entity(descriptor("Person", "demo.Person"))
            .expect("definition should succeed");

        let registry = SchemaRegistry::from_entity_types(
            store.entity_types().expect("enumeration should succeed"),
        )
        .expect("registry should build");

        (store, registry)
    }

    #[test]
    fn qualified_names_resolve_through_the_primary_path() {
        let (store, registry) = fixture();
        let resolver = EntityResolver::new(&store, &registry);

        let resolved = resolver
            .resolve("demo.Person")
            .expect("qualified name should resolve");
        assert_eq!(resolved.logical_name(), "Person");
    }

    #[test]
    fn logical_names_resolve_through_the_cache_fallback() {
        let (store, registry) = fixture();
        let resolver = EntityResolver::new(&store, &registry);

        let resolved = resolver
            .resolve("Person")
            .expect("logical name should resolve via fallback");
        assert_eq!(resolved.logical_name(), "Person");
        assert_eq!(resolved.qualified_name(), "demo.Person");
    }

    #[test]
    fn unknown_names_fail_with_the_primary_failure_attached() {
        let (store, registry) = fixture();
        let resolver = EntityResolver::new(&store, &registry);

        let err = resolver
            .resolve("Ghost")
            .expect_err("unknown entity should fail");

        let ResolveError::EntityNotFound { ref name, .. } = err else {
            panic!("expected EntityNotFound, got {err:?}");
        };
        assert_eq!(name, "Ghost");
        assert!(
            err.source().is_some(),
            "primary lookup failure should be preserved for diagnostics"
        );
    }
}
