use crate::{
    condition::{ConditionKind, ConditionNode},
    error::{ErrorClass, ErrorOrigin},
    store::{CriteriaError, NativePredicate, PredicateBuilder},
    translate::TranslationContext,
};
use thiserror::Error as ThisError;

///
/// TranslateError
///

#[derive(Debug, ThisError)]
pub enum TranslateError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// The condition kind has no translation. A deliberate explicit
    /// gap, never a silent no-op.
    #[error("no translation for condition kind '{kind}'")]
    UnsupportedCondition { kind: ConditionKind },

    #[error("'{kind}' requires at least one child condition")]
    EmptyComposite { kind: ConditionKind },
}

impl TranslateError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Criteria(err) => err.class(),
            Self::UnsupportedCondition { .. } => ErrorClass::Unsupported,
            Self::EmptyComposite { .. } => ErrorClass::Invalid,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Translator
    }
}

/// Compile one abstract condition tree into a native predicate bound to
/// the given context.
///
/// Pure and eager: the same node against the same entity descriptor
/// always yields a structurally identical predicate, and nothing is
/// deferred to execution time.
pub fn translate(
    node: &ConditionNode,
    ctx: &TranslationContext<'_>,
) -> Result<NativePredicate, TranslateError> {
    match node {
        ConditionNode::Equals { field, value } => {
            let path = ctx.root().get(field)?;
            if value.is_null() {
                // is-null test, not equality-to-null
                Ok(ctx.builder().is_null(&path))
            } else {
                Ok(ctx.builder().equal(&path, value.clone())?)
            }
        }

        ConditionNode::NotEquals { field, value } => {
            let path = ctx.root().get(field)?;
            Ok(ctx.builder().not_equal(&path, value.clone())?)
        }

        ConditionNode::LessThan { field, value } => {
            let path = ctx.root().get(field)?;
            Ok(ctx.builder().less_than(&path, value.clone())?)
        }

        ConditionNode::LessOrEqual { field, value } => {
            let path = ctx.root().get(field)?;
            Ok(ctx.builder().less_than_or_equal_to(&path, value.clone())?)
        }

        ConditionNode::GreaterThan { field, value } => {
            let path = ctx.root().get(field)?;
            Ok(ctx.builder().greater_than(&path, value.clone())?)
        }

        ConditionNode::GreaterOrEqual { field, value } => {
            let path = ctx.root().get(field)?;
            Ok(ctx.builder().greater_than_or_equal_to(&path, value.clone())?)
        }

        ConditionNode::In { .. } | ConditionNode::Like { .. } | ConditionNode::Between { .. } => {
            Err(TranslateError::UnsupportedCondition { kind: node.kind() })
        }

        ConditionNode::Not(inner) => Ok(ctx.builder().not(translate(inner, ctx)?)),

        ConditionNode::And(children) => {
            translate_composite(children, ConditionKind::And, ctx, PredicateBuilder::and)
        }

        ConditionNode::Or(children) => {
            translate_composite(children, ConditionKind::Or, ctx, PredicateBuilder::or)
        }
    }
}

// Validated multi-arity combination: children translate left-to-right
// in declared order and fold pairwise, so translation order is
// deterministic even though conjunction order cannot change the truth
// value.
fn translate_composite(
    children: &[ConditionNode],
    kind: ConditionKind,
    ctx: &TranslationContext<'_>,
    combine: fn(&PredicateBuilder, NativePredicate, NativePredicate) -> NativePredicate,
) -> Result<NativePredicate, TranslateError> {
    let mut iter = children.iter();
    let first = iter
        .next()
        .ok_or(TranslateError::EmptyComposite { kind })?;

    let mut combined = translate(first, ctx)?;
    for child in iter {
        let next = translate(child, ctx)?;
        combined = combine(ctx.builder(), combined, next);
    }

    Ok(combined)
}
