use crate::{
    types::Decimal,
    value::{
        TextMode, Value, canonical_cmp, coerce_boolean, coerce_generic, coerce_numeric,
        coerce_select, coerce_string, strict_order_cmp, text_fold_eq,
    },
};
use proptest::prelude::*;
use std::cmp::Ordering;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}
fn v_num(n: i64) -> Value {
    Value::Number(Decimal::from(n))
}

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(Decimal::from(n))),
        "[a-zA-Z0-9_ ]{0,8}".prop_map(Value::Text),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_scalar_value(),
        prop::collection::vec(arb_scalar_value(), 0..4).prop_map(Value::List),
    ]
}

// ---- coercion ----------------------------------------------------------

#[test]
fn string_coercion_maps_null_to_empty_text() {
    assert_eq!(coerce_string(&Value::Null).unwrap(), v_txt(""));
    assert_eq!(coerce_string(&v_txt("a")).unwrap(), v_txt("a"));
    assert!(coerce_string(&v_num(1)).is_err());
}

#[test]
fn numeric_coercion_rejects_numeric_text() {
    assert!(coerce_numeric(&v_num(1)).is_ok());
    assert!(coerce_numeric(&v_txt("1")).is_err());
    assert!(coerce_numeric(&Value::Null).is_err());
}

#[test]
fn boolean_coercion_is_strict() {
    assert!(coerce_boolean(&Value::Bool(true)).is_ok());
    assert!(coerce_boolean(&v_num(1)).is_err());
    assert!(coerce_boolean(&v_txt("true")).is_err());
}

#[test]
fn select_coercion_requires_a_collection() {
    assert!(coerce_select(&Value::list(["a"])).is_ok());
    assert!(coerce_select(&v_txt("a")).is_err());
}

proptest! {
    #[test]
    fn coercions_are_idempotent(value in arb_value()) {
        for coerce in [coerce_string, coerce_numeric, coerce_boolean, coerce_select, coerce_generic] {
            if let Ok(once) = coerce(&value) {
                let twice = coerce(&once).expect("coercion accepts its own output");
                prop_assert_eq!(once, twice);
            }
        }
    }
}

// ---- ordering ----------------------------------------------------------

#[test]
fn strict_order_is_defined_within_a_variant_only() {
    assert_eq!(
        strict_order_cmp(&v_num(1), &v_num(2)),
        Some(Ordering::Less)
    );
    assert_eq!(strict_order_cmp(&v_num(1), &v_txt("2")), None);
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Null), None);
}

#[test]
fn list_ordering_is_lexicographic() {
    let shorter = Value::list([1i64, 2]);
    let longer = Value::list([1i64, 2, 3]);
    assert_eq!(canonical_cmp(&shorter, &longer), Ordering::Less);
}

proptest! {
    #[test]
    fn canonical_order_agrees_with_equality(a in arb_value(), b in arb_value()) {
        let equal = canonical_cmp(&a, &b) == Ordering::Equal;
        prop_assert_eq!(equal, a == b);
    }

    #[test]
    fn canonical_order_is_antisymmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(canonical_cmp(&a, &b), canonical_cmp(&b, &a).reverse());
    }

    #[test]
    fn canonical_order_is_transitive(mut values in prop::collection::vec(arb_value(), 3)) {
        values.sort();
        prop_assert!(canonical_cmp(&values[0], &values[2]) != Ordering::Greater);
    }
}

// ---- text folding ------------------------------------------------------

#[test]
fn fold_eq_ignores_case_for_text_pairs_only() {
    assert!(text_fold_eq(&v_txt("Apple"), &v_txt("apple")));
    assert!(!text_fold_eq(&v_txt("1"), &v_num(1)));
    assert!(text_fold_eq(&v_num(3), &v_num(3)));
}

#[test]
fn text_eq_honors_mode() {
    let a = v_txt("Mild");
    let b = v_txt("MILD");
    assert_eq!(a.text_eq(&b, TextMode::Cs), Some(false));
    assert_eq!(a.text_eq(&b, TextMode::Ci), Some(true));
    assert_eq!(a.text_eq(&v_num(1), TextMode::Ci), None);
}

// ---- construction ------------------------------------------------------

#[test]
fn non_finite_floats_become_null() {
    assert_eq!(Value::from(f64::NAN), Value::Null);
    assert_eq!(Value::from(f64::NEG_INFINITY), Value::Null);
}

#[test]
fn cell_len_measures_text_and_collections() {
    assert_eq!(v_txt("héllo").cell_len(), Some(5));
    assert_eq!(Value::list(["a", "b"]).cell_len(), Some(2));
    assert_eq!(v_num(12345).cell_len(), None);
}

#[test]
fn serde_round_trip_preserves_values() {
    let value = Value::list([
        Value::Null,
        Value::Bool(true),
        v_num(42),
        v_txt("AESEV"),
        Value::list([1i64, 2]),
    ]);
    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, back);
}
