use crate::{
    error::OperatorError,
    fields::FieldKind,
    ops::Output,
    registry::{self, OperatorSpec, ScalarOperator, require_argument, require_list},
    value::{Value, coerce_select, text_fold_eq},
};

///
/// SelectOps
///
/// Operator family over one collection, probed with a single value.
/// Element comparison is case-insensitive for text-vs-text pairs and
/// strict otherwise; the argument is deliberately not coerced so that
/// heterogeneous probes stay comparable.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectOps {
    values: Vec<Value>,
}

impl SelectOps {
    pub const FAMILY: &'static str = "select";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        match coerce_select(value)? {
            Value::List(values) => Ok(Self { values }),
            other => Err(OperatorError::type_mismatch("select", &other)),
        }
    }

    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(Self::FAMILY, OPERATORS, self, name, argument, coerce_select)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(OPERATORS)
    }

    #[must_use]
    pub fn contains(&self, needle: &Value) -> bool {
        self.values.iter().any(|value| text_fold_eq(value, needle))
    }

    #[must_use]
    pub fn does_not_contain(&self, needle: &Value) -> bool {
        !self.contains(needle)
    }
}

const OPERATORS: &[ScalarOperator<SelectOps>] = &[
    ScalarOperator {
        name: "contains",
        label: None,
        input_kind: FieldKind::Select,
        auto_coerce: false,
        invoke: |ops, arg| Ok(Output::Bool(ops.contains(require_argument(arg)?))),
    },
    ScalarOperator {
        name: "does_not_contain",
        label: None,
        input_kind: FieldKind::Select,
        auto_coerce: false,
        invoke: |ops, arg| Ok(Output::Bool(ops.does_not_contain(require_argument(arg)?))),
    },
];

///
/// SelectMultipleOps
///
/// Operator family relating two collections. The receiver is treated
/// as a multiset: duplicate matches count separately in the
/// exactly-one predicate.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectMultipleOps {
    values: Vec<Value>,
}

impl SelectMultipleOps {
    pub const FAMILY: &'static str = "select_multiple";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        match coerce_select(value)? {
            Value::List(values) => Ok(Self { values }),
            other => Err(OperatorError::type_mismatch("select", &other)),
        }
    }

    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(
            Self::FAMILY,
            MULTIPLE_OPERATORS,
            self,
            name,
            argument,
            coerce_select,
        )
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(MULTIPLE_OPERATORS)
    }

    #[must_use]
    pub fn contains_all(&self, other: &[Value]) -> bool {
        other.iter().all(|needle| self.holds(needle))
    }

    #[must_use]
    pub fn is_contained_by(&self, other: &[Value]) -> bool {
        self.values
            .iter()
            .all(|value| other.iter().any(|candidate| text_fold_eq(candidate, value)))
    }

    #[must_use]
    pub fn is_not_contained_by(&self, other: &[Value]) -> bool {
        !self.is_contained_by(other)
    }

    #[must_use]
    pub fn shares_at_least_one_element_with(&self, other: &[Value]) -> bool {
        other.iter().any(|needle| self.holds(needle))
    }

    #[must_use]
    pub fn shares_exactly_one_element_with(&self, other: &[Value]) -> bool {
        other.iter().filter(|needle| self.holds(needle)).count() == 1
    }

    #[must_use]
    pub fn shares_no_elements_with(&self, other: &[Value]) -> bool {
        !self.shares_at_least_one_element_with(other)
    }

    fn holds(&self, needle: &Value) -> bool {
        self.values.iter().any(|value| text_fold_eq(value, needle))
    }
}

const MULTIPLE_OPERATORS: &[ScalarOperator<SelectMultipleOps>] = &[
    ScalarOperator {
        name: "contains_all",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.contains_all(require_list(arg)?))),
    },
    ScalarOperator {
        name: "is_contained_by",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.is_contained_by(require_list(arg)?))),
    },
    ScalarOperator {
        name: "is_not_contained_by",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.is_not_contained_by(require_list(arg)?))),
    },
    ScalarOperator {
        name: "shares_at_least_one_element_with",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| {
            Ok(Output::Bool(
                ops.shares_at_least_one_element_with(require_list(arg)?),
            ))
        },
    },
    ScalarOperator {
        name: "shares_exactly_one_element_with",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| {
            Ok(Output::Bool(
                ops.shares_exactly_one_element_with(require_list(arg)?),
            ))
        },
    },
    ScalarOperator {
        name: "shares_no_elements_with",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.shares_no_elements_with(require_list(arg)?))),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn select(items: &[&str]) -> SelectOps {
        SelectOps::new(&Value::list(items.iter().copied())).unwrap()
    }

    fn multi(items: &[&str]) -> SelectMultipleOps {
        SelectMultipleOps::new(&Value::list(items.iter().copied())).unwrap()
    }

    #[test]
    fn contains_folds_text_case() {
        let ops = select(&["Apple", "Pear"]);
        assert!(ops.contains(&Value::from("apple")));
        assert!(ops.does_not_contain(&Value::from("plum")));
    }

    #[test]
    fn contains_compares_non_text_strictly() {
        let ops = SelectOps::new(&Value::list([1i64, 2])).unwrap();
        assert!(ops.contains(&Value::from(2)));
        assert!(!ops.contains(&Value::from("2")));
    }

    #[test]
    fn containment_runs_both_directions() {
        let ops = multi(&["a", "b"]);
        assert!(ops.contains_all(&[Value::from("A")]));
        assert!(ops.is_contained_by(&[Value::from("A"), Value::from("B"), Value::from("c")]));
        assert!(ops.is_not_contained_by(&[Value::from("a")]));
    }

    #[test]
    fn shared_element_counting() {
        let ops = multi(&["a", "b", "c"]);
        assert!(ops.shares_at_least_one_element_with(&[Value::from("c"), Value::from("z")]));
        assert!(ops.shares_exactly_one_element_with(&[Value::from("c"), Value::from("z")]));
        // Duplicate hits count separately.
        assert!(!ops.shares_exactly_one_element_with(&[Value::from("c"), Value::from("C")]));
        assert!(ops.shares_no_elements_with(&[Value::from("x")]));
    }

    #[test]
    fn arguments_must_be_collections() {
        let ops = multi(&["a"]);
        assert!(matches!(
            ops.evaluate("contains_all", Some(&Value::from("a"))),
            Err(OperatorError::TypeMismatch { .. })
        ));
    }
}
