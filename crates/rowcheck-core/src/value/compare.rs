use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used for grouping keys, distinct sets
/// and ordering predicates.
///
/// Ordering rules:
/// 1. Variant-specific comparison for same-variant values
/// 2. Canonical variant rank for mixed-variant values
///
/// Mixed-variant comparisons are rank-only and must remain
/// deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let Some(ordering) = strict_order_cmp(left, right) {
        return ordering;
    }

    canonical_rank(left).cmp(&canonical_rank(right))
}

/// Strict comparator for identical orderable variants.
///
/// Returns `None` for mismatched variants and for `Null`; ordering
/// predicates treat `None` as a failed comparison, never an error.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => Some(canonical_cmp_list(a, b)),
        _ => None,
    }
}

/// Equality with case-folded text: text-vs-text compares
/// case-insensitively, every other pairing compares strictly.
#[must_use]
pub fn text_fold_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => left == right,
    }
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::List(_) => 1,
        Value::Null => 2,
        Value::Number(_) => 3,
        Value::Text(_) => 4,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}
