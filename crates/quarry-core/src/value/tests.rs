use crate::value::{Value, ValueKind, compare_eq, compare_order};
use std::cmp::Ordering;

#[test]
fn kind_classification_is_stable() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::from(3i64).kind(), ValueKind::Int);
    assert_eq!(Value::from(3u64).kind(), ValueKind::Uint);
    assert_eq!(Value::text("abc").kind(), ValueKind::Text);
    assert_eq!(Value::float(1.5).kind(), ValueKind::Float64);
    assert_eq!(Value::List(vec![]).kind(), ValueKind::List);
}

#[test]
fn equality_is_undefined_across_kinds() {
    assert_eq!(compare_eq(&Value::from(1i64), &Value::from(1u64)), None);
    assert_eq!(compare_eq(&Value::text("1"), &Value::from(1i64)), None);
}

#[test]
fn equality_is_undefined_against_null() {
    assert_eq!(compare_eq(&Value::Null, &Value::Null), None);
    assert_eq!(compare_eq(&Value::text("x"), &Value::Null), None);
}

#[test]
fn same_kind_equality() {
    assert_eq!(
        compare_eq(&Value::text("abc"), &Value::text("abc")),
        Some(true)
    );
    assert_eq!(
        compare_eq(&Value::text("abc"), &Value::text("abd")),
        Some(false)
    );
}

#[test]
fn ordering_follows_kind_gates() {
    assert_eq!(
        compare_order(&Value::from(3u64), &Value::from(5u64)),
        Some(Ordering::Less)
    );
    assert_eq!(
        compare_order(&Value::text("b"), &Value::text("a")),
        Some(Ordering::Greater)
    );
    // bools are equatable but not ordered
    assert_eq!(compare_order(&Value::from(true), &Value::from(false)), None);
    assert_eq!(
        compare_order(&Value::Blob(vec![1]), &Value::Blob(vec![2])),
        None
    );
}

#[test]
fn float_ordering_is_total() {
    assert_eq!(
        compare_order(&Value::float(f64::NAN), &Value::float(1.0)),
        Some(Ordering::Greater)
    );
    assert_eq!(
        compare_eq(&Value::float(0.5), &Value::float(0.5)),
        Some(true)
    );
}
