use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Condition AST
///
/// Pure, storage-agnostic representation of caller filters.
/// This layer carries no schema knowledge and no execution semantics;
/// all interpretation happens in the translator against a resolved
/// entity descriptor.
///

///
/// ConditionNode
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConditionNode {
    Equals { field: String, value: Value },
    NotEquals { field: String, value: Value },
    LessThan { field: String, value: Value },
    LessOrEqual { field: String, value: Value },
    GreaterThan { field: String, value: Value },
    GreaterOrEqual { field: String, value: Value },
    In { field: String, values: Vec<Value> },
    Like { field: String, pattern: String },
    Between { field: String, lower: Value, upper: Value },
    Not(Box<Self>),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl ConditionNode {
    #[must_use]
    pub const fn kind(&self) -> ConditionKind {
        match self {
            Self::Equals { .. } => ConditionKind::Equals,
            Self::NotEquals { .. } => ConditionKind::NotEquals,
            Self::LessThan { .. } => ConditionKind::LessThan,
            Self::LessOrEqual { .. } => ConditionKind::LessOrEqual,
            Self::GreaterThan { .. } => ConditionKind::GreaterThan,
            Self::GreaterOrEqual { .. } => ConditionKind::GreaterOrEqual,
            Self::In { .. } => ConditionKind::In,
            Self::Like { .. } => ConditionKind::Like,
            Self::Between { .. } => ConditionKind::Between,
            Self::Not(_) => ConditionKind::Not,
            Self::And(_) => ConditionKind::And,
            Self::Or(_) => ConditionKind::Or,
        }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Is-null test: `Equals` against the null marker.
    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: Value::Null,
        }
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LessThan {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LessOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::GreaterOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::In {
            field: field.into(),
            values,
        }
    }

    #[must_use]
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Like {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn between(
        field: impl Into<String>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        Self::Between {
            field: field.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(node: Self) -> Self {
        Self::Not(Box::new(node))
    }

    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }
}

impl BitAnd for ConditionNode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for ConditionNode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

///
/// ConditionKind
///
/// Variant tag used for diagnostics and for naming the kind in
/// unsupported-condition failures.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ConditionKind {
    Equals,
    NotEquals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    In,
    Like,
    Between,
    Not,
    And,
    Or,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::LessThan => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::In => "in",
            Self::Like => "like",
            Self::Between => "between",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_build_composites() {
        let node = ConditionNode::eq("name", "Jakarta") & ConditionNode::le("age", 50u64);
        assert_eq!(node.kind(), ConditionKind::And);

        let ConditionNode::And(children) = node else {
            panic!("expected a conjunction");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind(), ConditionKind::Equals);
        assert_eq!(children[1].kind(), ConditionKind::LessOrEqual);
    }

    #[test]
    fn is_null_is_equals_with_null_marker() {
        let node = ConditionNode::is_null("name");
        assert_eq!(
            node,
            ConditionNode::Equals {
                field: "name".to_string(),
                value: Value::Null,
            }
        );
    }

    #[test]
    fn condition_trees_round_trip_through_json() {
        let node = ConditionNode::not(
            ConditionNode::eq("name", "Jakarta") & ConditionNode::le("age", 50u64),
        );

        let json = serde_json::to_string(&node).expect("condition should serialize");
        let back: ConditionNode = serde_json::from_str(&json).expect("condition should parse");
        assert_eq!(node, back);
    }
}
