use crate::{
    store::{
        criteria::{NativeCompareOp, NativePredicate},
        record::NativeRow,
    },
    value::{Value, compare_eq, compare_order},
};
use std::cmp::Ordering;

/// Evaluate a native predicate against one stored row.
///
/// Pure runtime evaluation: typed binding was already checked when the
/// predicate was built, so an undefined comparison here (absent field,
/// stored null) is simply a non-match.
pub(crate) fn eval(row: &NativeRow, predicate: &NativePredicate) -> bool {
    match predicate {
        NativePredicate::IsNull { field } => row.get(field).is_none_or(Value::is_null),

        NativePredicate::Compare { field, op, literal } => {
            let Some(actual) = row.get(field) else {
                return false;
            };
            if actual.is_null() {
                return false;
            }

            match op {
                NativeCompareOp::Eq => compare_eq(actual, literal).unwrap_or(false),
                NativeCompareOp::Ne => compare_eq(actual, literal).is_some_and(|eq| !eq),
                NativeCompareOp::Lt => compare_order(actual, literal).is_some_and(Ordering::is_lt),
                NativeCompareOp::Le => compare_order(actual, literal).is_some_and(Ordering::is_le),
                NativeCompareOp::Gt => compare_order(actual, literal).is_some_and(Ordering::is_gt),
                NativeCompareOp::Ge => compare_order(actual, literal).is_some_and(Ordering::is_ge),
            }
        }

        NativePredicate::Not(inner) => !eval(row, inner),
        NativePredicate::And(left, right) => eval(row, left) && eval(row, right),
        NativePredicate::Or(left, right) => eval(row, left) || eval(row, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> NativeRow {
        NativeRow::new()
            .with("name", "Jakarta")
            .with("age", 35u64)
            .with("nickname", Value::Null)
    }

    fn compare(field: &str, op: NativeCompareOp, literal: impl Into<Value>) -> NativePredicate {
        NativePredicate::Compare {
            field: field.to_string(),
            op,
            literal: literal.into(),
        }
    }

    #[test]
    fn is_null_covers_absent_and_stored_null() {
        let row = row();
        let absent = NativePredicate::IsNull {
            field: "salary".to_string(),
        };
        let stored = NativePredicate::IsNull {
            field: "nickname".to_string(),
        };
        let present = NativePredicate::IsNull {
            field: "name".to_string(),
        };

        assert!(eval(&row, &absent));
        assert!(eval(&row, &stored));
        assert!(!eval(&row, &present));
    }

    #[test]
    fn null_fields_never_match_comparisons() {
        let row = row();
        let predicate = compare("nickname", NativeCompareOp::Eq, "Jak");
        assert!(!eval(&row, &predicate));
    }

    #[test]
    fn ordered_comparison_on_matching_kind() {
        let row = row();
        assert!(eval(&row, &compare("age", NativeCompareOp::Le, 50u64)));
        assert!(!eval(&row, &compare("age", NativeCompareOp::Gt, 50u64)));
        // kind mismatch is undefined, therefore a non-match
        assert!(!eval(&row, &compare("age", NativeCompareOp::Le, 50i64)));
    }

    #[test]
    fn boolean_composition() {
        let row = row();
        let both = NativePredicate::And(
            Box::new(compare("name", NativeCompareOp::Eq, "Jakarta")),
            Box::new(compare("age", NativeCompareOp::Le, 50u64)),
        );
        let neither = NativePredicate::Not(Box::new(both.clone()));

        assert!(eval(&row, &both));
        assert!(!eval(&row, &neither));
    }
}
