mod stream;

pub use stream::{Liveness, RecordStream};

use crate::{
    error::{ErrorClass, ErrorOrigin},
    request::{Projection, QueryRequest},
    schema::{EntityResolver, ResolveError, SchemaRegistry},
    store::{NativeOutcome, NativeQuery, StoreConnection, StoreError},
    translate::{TranslateError, TranslationContext, translate},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// ExecuteError
///
/// Everything one structured query execution can surface. Nothing here
/// is retried or downgraded; failures reach the caller immediately.
///

#[derive(Debug, ThisError)]
pub enum ExecuteError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The requested operation is explicitly outside the current
    /// contract. Reported, never approximated.
    #[error("operation '{operation}' is not implemented")]
    NotImplemented { operation: &'static str },

    #[error("session is closed")]
    SessionClosed,

    #[error("store returned a mismatched outcome for projection {projection}")]
    OutcomeMismatch { projection: Projection },
}

impl ExecuteError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Resolve(err) => err.class(),
            Self::Translate(err) => err.class(),
            Self::Store(err) => err.class(),
            Self::NotImplemented { .. } => ErrorClass::NotImplemented,
            Self::SessionClosed => ErrorClass::Closed,
            Self::OutcomeMismatch { .. } => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Resolve(err) => err.origin(),
            Self::Translate(err) => err.origin(),
            Self::Store(err) => err.origin(),
            Self::NotImplemented { .. } | Self::OutcomeMismatch { .. } => ErrorOrigin::Executor,
            Self::SessionClosed => ErrorOrigin::Session,
        }
    }
}

///
/// QueryOutcome
///
/// Result of one structured query, shaped by its projection kind.
/// `Exists` is reserved: the executor reports it as not implemented
/// rather than answering wrongly.
///

pub enum QueryOutcome {
    Rows(RecordStream),
    Count(u64),
    Exists(bool),
}

///
/// QueryExecutor
///
/// Per-request execution primitive: resolve the entity, translate the
/// condition, assemble the native query, run it, wrap the outcome.
/// Constructed by the session for each call.
///

pub struct QueryExecutor<'a, S: StoreConnection> {
    store: &'a S,
    registry: &'a SchemaRegistry,
    liveness: Liveness,
}

impl<'a, S: StoreConnection> QueryExecutor<'a, S> {
    pub(crate) const fn new(store: &'a S, registry: &'a SchemaRegistry, liveness: Liveness) -> Self {
        Self {
            store,
            registry,
            liveness,
        }
    }

    /// Execute one request, dispatching on its projection kind.
    pub fn execute(&self, request: &QueryRequest) -> Result<QueryOutcome, ExecuteError> {
        match request.projection() {
            Projection::AllRows => self.rows(request).map(QueryOutcome::Rows),
            Projection::RowCount => self.count(request).map(QueryOutcome::Count),
            Projection::Exists => self.exists(request).map(QueryOutcome::Exists),
        }
    }

    /// All matching rows as a lazy single-pass stream.
    pub fn rows(&self, request: &QueryRequest) -> Result<RecordStream, ExecuteError> {
        let query = self.build_query(request, Projection::AllRows)?;

        match self.store.execute(&query)? {
            NativeOutcome::Rows(rows) => Ok(RecordStream::new(rows, self.liveness.clone())),
            NativeOutcome::Count(_) => Err(ExecuteError::OutcomeMismatch {
                projection: Projection::AllRows,
            }),
        }
    }

    /// Matching-row count as a scalar.
    pub fn count(&self, request: &QueryRequest) -> Result<u64, ExecuteError> {
        let query = self.build_query(request, Projection::RowCount)?;

        match self.store.execute(&query)? {
            NativeOutcome::Count(count) => Ok(count),
            NativeOutcome::Rows(_) => Err(ExecuteError::OutcomeMismatch {
                projection: Projection::RowCount,
            }),
        }
    }

    /// Existence checks are outside the guaranteed contract.
    pub fn exists(&self, _request: &QueryRequest) -> Result<bool, ExecuteError> {
        Err(ExecuteError::NotImplemented { operation: "exists" })
    }

    fn build_query(
        &self,
        request: &QueryRequest,
        projection: Projection,
    ) -> Result<NativeQuery, ExecuteError> {
        if !self.liveness.is_open() {
            return Err(ExecuteError::SessionClosed);
        }

        debug!(
            entity = request.entity(),
            projection = %projection,
            conditioned = request.condition().is_some(),
            "executing structured query"
        );

        let resolver = EntityResolver::new(self.store, self.registry);
        let descriptor = resolver.resolve(request.entity())?;

        let mut ctx = TranslationContext::new(&descriptor);
        if projection == Projection::RowCount {
            ctx.select_count();
        }

        // Unconditioned requests take the select-everything fast path;
        // the translator is never involved.
        if let Some(condition) = request.condition() {
            let predicate = translate(condition, &ctx)?;
            ctx.where_filter(predicate);
        }

        Ok(ctx.finish())
    }
}
