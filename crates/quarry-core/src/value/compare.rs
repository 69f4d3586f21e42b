use crate::value::Value;
use std::cmp::Ordering;

/// Strict same-kind equality.
///
/// Returns `None` when the comparison is undefined: mismatched kinds,
/// or either side being the null marker. Callers decide the policy for
/// undefined comparisons; row evaluation treats them as non-matches.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    if left.is_null() || right.is_null() {
        return None;
    }
    if left.kind() != right.kind() {
        return None;
    }

    Some(left == right)
}

/// Strict same-kind total ordering.
///
/// Defined only for kinds with `supports_ordering()`; everything else
/// (and any null operand) returns `None`.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if left.kind() != right.kind() || !left.kind().supports_ordering() {
        return None;
    }

    match (left, right) {
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) | (Value::Uint(a), Value::Uint(b)) => {
            Some(a.cmp(b))
        }
        _ => None,
    }
}
