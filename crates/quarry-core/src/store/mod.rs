pub mod criteria;
pub mod memory;
mod record;

pub use criteria::{
    CriteriaError, EntityRoot, FieldPath, NativeCompareOp, NativePredicate, NativeProjection,
    NativeQuery, PredicateBuilder,
};
pub use record::{NativeRow, NativeRows, Record};

use crate::{
    error::{ErrorClass, ErrorOrigin},
    schema::{EntityTypeDescriptor, FieldKind},
    value::{Value, ValueKind},
};
use thiserror::Error as ThisError;

///
/// NativeOutcome
///
/// What one executed native query produced: a result set or a scalar
/// count, depending on the query's projection.
///

#[derive(Clone, Debug)]
pub enum NativeOutcome {
    Rows(NativeRows),
    Count(u64),
}

///
/// StoreConnection
///
/// The "entity manager" seam: everything the engine consumes from the
/// underlying typed entity store. One connection backs one session;
/// connections are not assumed safe for concurrent use.
///

pub trait StoreConnection {
    /// Name of the store unit this connection targets.
    fn unit(&self) -> &str;

    /// Enumerate every entity type the store metamodel knows.
    fn entity_types(&self) -> Result<Vec<EntityTypeDescriptor>, StoreError>;

    /// The store's own metamodel lookup. May be stricter about naming
    /// than callers are (qualified vs logical names); the resolver
    /// compensates.
    fn metamodel_lookup(&self, type_name: &str) -> Result<EntityTypeDescriptor, StoreError>;

    /// Execute an assembled native query.
    fn execute(&self, query: &NativeQuery) -> Result<NativeOutcome, StoreError>;

    /// Execute a native query string. Grammar and semantics are the
    /// store's own.
    fn execute_raw(&self, text: &str) -> Result<NativeRows, StoreError>;

    /// Identifier lookup for one row.
    fn find_by_key(
        &self,
        entity: &EntityTypeDescriptor,
        key: &Value,
    ) -> Result<Option<NativeRow>, StoreError>;

    /// Persist a new row, assigning a generated identifier when the row
    /// omits one. Returns the completed row.
    fn insert(&mut self, entity: &EntityTypeDescriptor, row: NativeRow)
    -> Result<NativeRow, StoreError>;

    /// Replace an existing row addressed by its identifier.
    fn update(&mut self, entity: &EntityTypeDescriptor, row: NativeRow)
    -> Result<NativeRow, StoreError>;

    /// Release the connection.
    fn close(&mut self);
}

///
/// StoreError
///
/// Failures the underlying store defines. These pass through the engine
/// unchanged; the engine adds no retry or fallback on top of them.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("connection is closed")]
    ConnectionClosed,

    #[error("entity type '{name}' already defined")]
    DuplicateEntityType { name: String },

    #[error("entity type '{name}' not known to the store metamodel")]
    UnknownEntityType { name: String },

    #[error("entity '{entity}' already has a row with key {key}")]
    DuplicateKey { entity: String, key: Value },

    #[error("entity '{entity}' has no row with key {key}")]
    RowNotFound { entity: String, key: Value },

    #[error("entity '{entity}' row carries no identifier and the store cannot generate one")]
    MissingIdentifier { entity: String },

    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error("field '{field}' on entity '{entity}' declared {expected} rejects a {found} value")]
    FieldKindMismatch {
        entity: String,
        field: String,
        expected: FieldKind,
        found: ValueKind,
    },

    #[error("cannot parse native query '{query}': {reason}")]
    RawQuerySyntax { query: String, reason: String },
}

impl StoreError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ConnectionClosed => ErrorClass::Closed,
            Self::DuplicateEntityType { .. } | Self::DuplicateKey { .. } => ErrorClass::Conflict,
            Self::UnknownEntityType { .. } | Self::RowNotFound { .. } => ErrorClass::NotFound,
            Self::MissingIdentifier { .. }
            | Self::UnknownField { .. }
            | Self::RawQuerySyntax { .. } => ErrorClass::Invalid,
            Self::FieldKindMismatch { .. } => ErrorClass::TypeMismatch,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Store
    }
}
