//! ## Crate layout
//! - `core`: the engine — schema registry, entity resolver, condition
//!   translator, query executor, session facade, and the store seam.
//! - `error`: the stable public error taxonomy mapped from core errors.
//!
//! The `prelude` module mirrors the surface a caller needs to open a
//! session and issue structured queries.

pub use quarry_core as core;

mod error;

pub use error::{Error, ErrorKind, ErrorOrigin, QueryErrorKind, StoreErrorKind};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind,
        core::{
            condition::ConditionNode,
            config::{SessionConfig, Settings, UNIT_KEY},
            executor::{QueryOutcome, RecordStream},
            request::{Projection, QueryRequest},
            schema::{EntityTypeDescriptor, FieldKind},
            session::Session,
            store::{Record, StoreConnection, memory::MemoryStore},
            value::Value,
        },
    };
}
