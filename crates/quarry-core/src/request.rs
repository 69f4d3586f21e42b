use crate::condition::ConditionNode;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Projection
/// Which shape of result a structured query requests.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Projection {
    AllRows,
    RowCount,
    Exists,
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AllRows => "all_rows",
            Self::RowCount => "row_count",
            Self::Exists => "exists",
        };
        write!(f, "{label}")
    }
}

///
/// QueryRequest
///
/// One structured query: logical entity name, optional condition tree,
/// projection kind. Constructed per invocation; stateless.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QueryRequest {
    entity: String,
    condition: Option<ConditionNode>,
    projection: Projection,
}

impl QueryRequest {
    #[must_use]
    pub fn all_rows(entity: impl Into<String>) -> Self {
        Self::new(entity, Projection::AllRows)
    }

    #[must_use]
    pub fn row_count(entity: impl Into<String>) -> Self {
        Self::new(entity, Projection::RowCount)
    }

    #[must_use]
    pub fn exists(entity: impl Into<String>) -> Self {
        Self::new(entity, Projection::Exists)
    }

    fn new(entity: impl Into<String>, projection: Projection) -> Self {
        Self {
            entity: entity.into(),
            condition: None,
            projection,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: ConditionNode) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn condition(&self) -> Option<&ConditionNode> {
        self.condition.as_ref()
    }

    #[must_use]
    pub const fn projection(&self) -> Projection {
        self.projection
    }
}
