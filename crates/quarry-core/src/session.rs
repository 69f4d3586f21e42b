use crate::{
    error::{ErrorClass, ErrorOrigin},
    executor::{ExecuteError, Liveness, QueryExecutor, QueryOutcome, RecordStream},
    request::QueryRequest,
    schema::{EntityResolver, EntityTypeDescriptor, RegistryError, ResolveError, SchemaRegistry},
    store::{Record, StoreConnection, StoreError},
    value::Value,
};
use std::cell::RefCell;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// SessionError
/// Failures while opening a session.
///

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SessionError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Store(err) => err.class(),
            Self::Registry(err) => err.class(),
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Store(err) => err.origin(),
            Self::Registry(err) => err.origin(),
        }
    }
}

///
/// Session
///
/// Per-connection handle over one store. Opening a session eagerly
/// enumerates the store metamodel into the schema registry before any
/// query may be issued; the registry is read-only afterwards.
///
/// Single-threaded by design: the connection is not assumed safe for
/// concurrent operations, so everything runs synchronously on the
/// caller's thread. Independent sessions share no state.
///

pub struct Session<S: StoreConnection> {
    store: RefCell<S>,
    registry: SchemaRegistry,
    liveness: Liveness,
}

impl<S: StoreConnection> Session<S> {
    /// Open a session, building the logical-name index from one
    /// metamodel enumeration.
    pub fn open(store: S) -> Result<Self, SessionError> {
        let registry = SchemaRegistry::from_entity_types(store.entity_types()?)?;

        debug!(
            unit = store.unit(),
            entities = registry.len(),
            "session opened"
        );

        Ok(Self {
            store: RefCell::new(store),
            registry,
            liveness: Liveness::open(),
        })
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    // ---------------------------------------------------------------------
    // Structured query path
    // ---------------------------------------------------------------------

    /// Execute one structured request, dispatching on its projection.
    pub fn execute(&self, request: &QueryRequest) -> Result<QueryOutcome, ExecuteError> {
        let store = self.store.borrow();
        QueryExecutor::new(&*store, &self.registry, self.liveness.clone()).execute(request)
    }

    /// All matching rows as a lazy single-pass stream.
    pub fn select(&self, request: &QueryRequest) -> Result<RecordStream, ExecuteError> {
        let store = self.store.borrow();
        QueryExecutor::new(&*store, &self.registry, self.liveness.clone()).rows(request)
    }

    /// Matching-row count.
    pub fn count(&self, request: &QueryRequest) -> Result<u64, ExecuteError> {
        let store = self.store.borrow();
        QueryExecutor::new(&*store, &self.registry, self.liveness.clone()).count(request)
    }

    /// Existence checks are outside the guaranteed contract.
    pub fn exists(&self, request: &QueryRequest) -> Result<bool, ExecuteError> {
        let store = self.store.borrow();
        QueryExecutor::new(&*store, &self.registry, self.liveness.clone()).exists(request)
    }

    // ---------------------------------------------------------------------
    // Escape hatches (translator bypassed; store semantics apply)
    // ---------------------------------------------------------------------

    /// Execute a native query string.
    pub fn raw_query(&self, text: &str) -> Result<RecordStream, ExecuteError> {
        let rows = self.store.borrow().execute_raw(text)?;

        Ok(RecordStream::new(rows, self.liveness.clone()))
    }

    /// Identifier lookup for one record.
    pub fn find_by_key(&self, entity: &str, key: &Value) -> Result<Option<Record>, ExecuteError> {
        let descriptor = self.resolve(entity)?;
        let row = self.store.borrow().find_by_key(&descriptor, key)?;

        Ok(row.map(|row| Record::from_native(descriptor.logical_name().to_string(), row)))
    }

    /// Persist a new record; the store assigns the identifier when the
    /// record omits it.
    pub fn insert(&self, record: Record) -> Result<Record, ExecuteError> {
        let descriptor = self.resolve(record.entity())?;
        let row = self
            .store
            .borrow_mut()
            .insert(&descriptor, record.into_native())?;

        Ok(Record::from_native(descriptor.logical_name().to_string(), row))
    }

    /// Replace an existing record addressed by its identifier.
    pub fn update(&self, record: Record) -> Result<Record, ExecuteError> {
        let descriptor = self.resolve(record.entity())?;
        let row = self
            .store
            .borrow_mut()
            .update(&descriptor, record.into_native())?;

        Ok(Record::from_native(descriptor.logical_name().to_string(), row))
    }

    /// Delete-by-query is outside the guaranteed contract.
    pub fn delete_by_query(&self, _request: &QueryRequest) -> Result<u64, ExecuteError> {
        Err(ExecuteError::NotImplemented {
            operation: "delete_by_query",
        })
    }

    /// Batched writes are outside the guaranteed contract.
    pub fn insert_many(
        &self,
        _records: impl IntoIterator<Item = Record>,
    ) -> Result<Vec<Record>, ExecuteError> {
        Err(ExecuteError::NotImplemented {
            operation: "insert_many",
        })
    }

    /// Release the connection. Streams handed out earlier fail fast
    /// with `SessionClosed` from here on.
    pub fn close(self) {
        drop(self);
    }

    fn resolve(&self, entity: &str) -> Result<EntityTypeDescriptor, ResolveError> {
        let store = self.store.borrow();
        EntityResolver::new(&*store, &self.registry).resolve(entity)
    }
}

impl<S: StoreConnection> Drop for Session<S> {
    fn drop(&mut self) {
        self.liveness.close();
        self.store.borrow_mut().close();
        debug!("session closed");
    }
}
