use crate::{
    error::{ErrorClass, ErrorOrigin},
    schema::{EntityTypeDescriptor, FieldKind},
    value::{Value, ValueKind},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Native criteria API
///
/// The store's own query-construction surface. The engine never
/// executes these nodes itself; it compiles the abstract condition
/// tree into them and hands the finished query to the connection.
///

///
/// NativeCompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NativeCompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl NativeCompareOp {
    /// Whether this operator requires a total order on the field kind.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }
}

impl fmt::Display for NativeCompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        write!(f, "{label}")
    }
}

///
/// NativePredicate
///
/// Native boolean filter expression. Conjunction and disjunction are
/// binary here — the builder combines wider inputs pairwise.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NativePredicate {
    IsNull {
        field: String,
    },
    Compare {
        field: String,
        op: NativeCompareOp,
        literal: Value,
    },
    Not(Box<Self>),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
}

///
/// FieldPath
///
/// A typed attribute handle obtained from an entity root. Carries the
/// declared kind so the builder can check literal bindings.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPath {
    field: String,
    kind: FieldKind,
}

impl FieldPath {
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }
}

///
/// EntityRoot
///
/// The query source: resolves field names against one entity type.
///

#[derive(Clone, Copy, Debug)]
pub struct EntityRoot<'a> {
    descriptor: &'a EntityTypeDescriptor,
}

impl<'a> EntityRoot<'a> {
    #[must_use]
    pub const fn new(descriptor: &'a EntityTypeDescriptor) -> Self {
        Self { descriptor }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'a EntityTypeDescriptor {
        self.descriptor
    }

    /// Resolve one attribute path; the field must be declared.
    pub fn get(&self, field: &str) -> Result<FieldPath, CriteriaError> {
        let kind = self
            .descriptor
            .field(field)
            .ok_or_else(|| CriteriaError::UnknownField {
                entity: self.descriptor.logical_name().to_string(),
                field: field.to_string(),
            })?;

        Ok(FieldPath {
            field: field.to_string(),
            kind,
        })
    }
}

///
/// PredicateBuilder
///
/// Stateless factory for native predicates with typed literal binding.
/// Literal/field incompatibilities surface here, at construction time,
/// never at execution time.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PredicateBuilder;

impl PredicateBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn is_null(&self, path: &FieldPath) -> NativePredicate {
        NativePredicate::IsNull {
            field: path.field().to_string(),
        }
    }

    pub fn equal(&self, path: &FieldPath, literal: Value) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Eq, literal)
    }

    pub fn not_equal(
        &self,
        path: &FieldPath,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Ne, literal)
    }

    pub fn less_than(
        &self,
        path: &FieldPath,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Lt, literal)
    }

    pub fn less_than_or_equal_to(
        &self,
        path: &FieldPath,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Le, literal)
    }

    pub fn greater_than(
        &self,
        path: &FieldPath,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Gt, literal)
    }

    pub fn greater_than_or_equal_to(
        &self,
        path: &FieldPath,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        self.compare(path, NativeCompareOp::Ge, literal)
    }

    #[must_use]
    pub fn and(&self, left: NativePredicate, right: NativePredicate) -> NativePredicate {
        NativePredicate::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(&self, left: NativePredicate, right: NativePredicate) -> NativePredicate {
        NativePredicate::Or(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn not(&self, inner: NativePredicate) -> NativePredicate {
        NativePredicate::Not(Box::new(inner))
    }

    // One binding check for the whole comparison family.
    fn compare(
        &self,
        path: &FieldPath,
        op: NativeCompareOp,
        literal: Value,
    ) -> Result<NativePredicate, CriteriaError> {
        if literal.is_null() {
            // CONTRACT: null tests go through is_null, never a comparison.
            return Err(CriteriaError::NullLiteral {
                field: path.field().to_string(),
                op,
            });
        }

        if op.is_ordered() && !path.kind().supports_ordering() {
            return Err(CriteriaError::UnorderedField {
                field: path.field().to_string(),
                kind: path.kind(),
            });
        }

        if !path.kind().matches_value(&literal) {
            return Err(CriteriaError::TypeMismatch {
                field: path.field().to_string(),
                expected: path.kind(),
                found: literal.kind(),
            });
        }

        Ok(NativePredicate::Compare {
            field: path.field().to_string(),
            op,
            literal,
        })
    }
}

///
/// NativeProjection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NativeProjection {
    Rows,
    Count,
}

///
/// NativeQuery
///
/// A fully assembled native query: source type, projection, optional
/// filter. Built by the executor through the translation context.
///

#[derive(Clone, Debug)]
pub struct NativeQuery {
    entity: String,
    projection: NativeProjection,
    filter: Option<NativePredicate>,
}

impl NativeQuery {
    /// Start a "select everything of this type" draft.
    #[must_use]
    pub fn rows_of(descriptor: &EntityTypeDescriptor) -> Self {
        Self {
            entity: descriptor.qualified_name().to_string(),
            projection: NativeProjection::Rows,
            filter: None,
        }
    }

    /// Replace the projection with a count aggregate.
    pub const fn select_count(&mut self) {
        self.projection = NativeProjection::Count;
    }

    /// Attach the query filter.
    pub fn where_filter(&mut self, predicate: NativePredicate) {
        self.filter = Some(predicate);
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn projection(&self) -> NativeProjection {
        self.projection
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&NativePredicate> {
        self.filter.as_ref()
    }
}

///
/// CriteriaError
///
/// Typed-binding failures raised while constructing native predicates.
/// These are translation-time errors: the query never reaches the
/// store.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum CriteriaError {
    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error("field '{field}' declared {expected} is incompatible with a {found} literal")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: ValueKind,
    },

    #[error("field '{field}' of kind {kind} does not support ordering comparisons")]
    UnorderedField { field: String, kind: FieldKind },

    #[error("null literal is not valid for operator {op} on field '{field}'")]
    NullLiteral { field: String, op: NativeCompareOp },
}

impl CriteriaError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownField { .. } => ErrorClass::Invalid,
            Self::TypeMismatch { .. } | Self::UnorderedField { .. } | Self::NullLiteral { .. } => {
                ErrorClass::TypeMismatch
            }
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Translator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn person() -> EntityTypeDescriptor {
        EntityTypeDescriptor::new(
            "Person",
            "demo.Person",
            "id",
            [
                ("id", FieldKind::Uint),
                ("name", FieldKind::Text),
                ("age", FieldKind::Uint),
                ("photo", FieldKind::Blob),
            ],
        )
        .expect("descriptor should build")
    }

    #[test]
    fn unknown_fields_are_rejected_at_the_root() {
        let descriptor = person();
        let root = EntityRoot::new(&descriptor);
        let err = root.get("salary").expect_err("undeclared field");

        assert_eq!(err, CriteriaError::UnknownField {
            entity: "Person".to_string(),
            field: "salary".to_string(),
        });
    }

    #[test]
    fn typed_binding_rejects_kind_mismatch() {
        let descriptor = person();
        let root = EntityRoot::new(&descriptor);
        let builder = PredicateBuilder::new();

        let path = root.get("age").expect("declared field");
        let err = builder
            .equal(&path, Value::text("thirty-five"))
            .expect_err("text literal against uint field");

        assert_eq!(err, CriteriaError::TypeMismatch {
            field: "age".to_string(),
            expected: FieldKind::Uint,
            found: ValueKind::Text,
        });
    }

    #[test]
    fn ordering_requires_an_orderable_kind() {
        let descriptor = person();
        let root = EntityRoot::new(&descriptor);
        let builder = PredicateBuilder::new();

        let path = root.get("photo").expect("declared field");
        let err = builder
            .less_than_or_equal_to(&path, Value::Blob(vec![0]))
            .expect_err("blobs are not ordered");

        assert!(matches!(err, CriteriaError::UnorderedField { .. }));
    }

    #[test]
    fn null_literals_must_use_is_null() {
        let descriptor = person();
        let root = EntityRoot::new(&descriptor);
        let builder = PredicateBuilder::new();

        let path = root.get("name").expect("declared field");
        let err = builder
            .equal(&path, Value::Null)
            .expect_err("null literal outside is_null");

        assert!(matches!(err, CriteriaError::NullLiteral { .. }));

        let is_null = builder.is_null(&path);
        assert_eq!(is_null, NativePredicate::IsNull {
            field: "name".to_string(),
        });
    }

    #[test]
    fn count_projection_replaces_rows() {
        let descriptor = person();
        let mut query = NativeQuery::rows_of(&descriptor);
        assert_eq!(query.projection(), NativeProjection::Rows);
        assert_eq!(query.entity(), "demo.Person");

        query.select_count();
        assert_eq!(query.projection(), NativeProjection::Count);
    }
}
