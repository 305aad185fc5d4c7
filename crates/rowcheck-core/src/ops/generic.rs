use crate::{
    error::OperatorError,
    fields::FieldKind,
    ops::{Output, select::SelectMultipleOps},
    registry::{self, OperatorSpec, ScalarOperator, require_argument},
    types::Decimal,
    value::{Value, coerce_generic},
};

///
/// GenericOps
///
/// Dispatch wrapper for values whose kind is only known at runtime.
/// Rather than deriving from several scalar families, the stored
/// value is a tagged variant and each operator branches on its kind:
/// numbers take the tolerant numeric path, everything else the
/// string/strict path.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenericOps {
    value: Value,
}

impl GenericOps {
    pub const FAMILY: &'static str = "generic";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        Ok(Self {
            value: coerce_generic(value)?,
        })
    }

    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(Self::FAMILY, OPERATORS, self, name, argument, coerce_generic)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(OPERATORS)
    }

    /// Kind-dispatching equality: numeric tolerance for a stored
    /// number, strict equality otherwise.
    pub fn equal_to(&self, other: &Value) -> Result<bool, OperatorError> {
        match &self.value {
            Value::Number(number) => self.num_equal_to_inner(*number, other),
            _ => Ok(self.value == *other),
        }
    }

    pub fn not_equal_to(&self, other: &Value) -> Result<bool, OperatorError> {
        Ok(!self.equal_to(other)?)
    }

    pub fn num_equal_to(&self, other: &Value) -> Result<bool, OperatorError> {
        let number = self
            .value
            .as_number()
            .ok_or_else(|| OperatorError::type_mismatch("numeric", &self.value))?;
        self.num_equal_to_inner(number, other)
    }

    pub fn num_not_equal_to(&self, other: &Value) -> Result<bool, OperatorError> {
        Ok(!self.num_equal_to(other)?)
    }

    #[must_use]
    pub fn str_equal_to(&self, other: &Value) -> bool {
        self.value == *other
    }

    #[must_use]
    pub fn str_not_equal_to(&self, other: &Value) -> bool {
        !self.str_equal_to(other)
    }

    /// Substring on text, membership on collections.
    pub fn contains(&self, other: &Value) -> Result<bool, OperatorError> {
        match &self.value {
            Value::Text(text) => {
                let needle = other
                    .as_text()
                    .ok_or_else(|| OperatorError::type_mismatch("string", other))?;
                Ok(text.contains(needle))
            }
            Value::List(items) => Ok(items.contains(other)),
            _ => Err(OperatorError::type_mismatch("select", &self.value)),
        }
    }

    /// Wrap a scalar receiver into a one-element collection and
    /// delegate to the select-multiple containment rule.
    pub fn is_contained_by(&self, other: &Value) -> Result<bool, OperatorError> {
        let receiver = match &self.value {
            Value::List(_) => self.value.clone(),
            scalar => Value::List(vec![scalar.clone()]),
        };
        let other_items = other
            .as_list()
            .ok_or_else(|| OperatorError::type_mismatch("select", other))?;
        Ok(SelectMultipleOps::new(&receiver)?.is_contained_by(other_items))
    }

    fn num_equal_to_inner(&self, number: Decimal, other: &Value) -> Result<bool, OperatorError> {
        let other_number = other
            .as_number()
            .ok_or_else(|| OperatorError::type_mismatch("numeric", other))?;
        Ok(number.eq_within_epsilon(other_number))
    }
}

const OPERATORS: &[ScalarOperator<GenericOps>] = &[
    ScalarOperator {
        name: "equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.equal_to(require_argument(arg)?)?)),
    },
    ScalarOperator {
        name: "not_equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.not_equal_to(require_argument(arg)?)?)),
    },
    ScalarOperator {
        name: "num_equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.num_equal_to(require_argument(arg)?)?)),
    },
    ScalarOperator {
        name: "num_not_equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.num_not_equal_to(require_argument(arg)?)?)),
    },
    ScalarOperator {
        name: "str_equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.str_equal_to(require_argument(arg)?))),
    },
    ScalarOperator {
        name: "str_not_equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.str_not_equal_to(require_argument(arg)?))),
    },
    ScalarOperator {
        name: "contains",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.contains(require_argument(arg)?)?)),
    },
    ScalarOperator {
        name: "is_contained_by",
        label: None,
        input_kind: FieldKind::SelectMultiple,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.is_contained_by(require_argument(arg)?)?)),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(value: impl Into<Value>) -> GenericOps {
        GenericOps::new(&value.into()).unwrap()
    }

    #[test]
    fn equality_dispatches_on_the_stored_kind() {
        assert!(generic(1.000_000_1).equal_to(&Value::from(1)).unwrap());
        assert!(generic("MILD").equal_to(&Value::from("MILD")).unwrap());
        assert!(!generic("1").equal_to(&Value::from(1)).unwrap());
    }

    #[test]
    fn numeric_path_rejects_non_numeric_arguments() {
        assert!(matches!(
            generic(1).num_equal_to(&Value::from("1")),
            Err(OperatorError::TypeMismatch { .. })
        ));
        assert!(matches!(
            generic("x").num_equal_to(&Value::from(1)),
            Err(OperatorError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn contains_is_substring_for_text_and_membership_for_lists() {
        assert!(generic("ABCD").contains(&Value::from("BC")).unwrap());
        assert!(generic(Value::list([1i64, 2])).contains(&Value::from(2)).unwrap());
        assert!(!generic(Value::list([1i64, 2])).contains(&Value::from(3)).unwrap());
    }

    #[test]
    fn scalar_receivers_wrap_into_singleton_lists() {
        let candidates = Value::list(["mild", "severe"]);
        assert!(generic("MILD").is_contained_by(&candidates).unwrap());
        assert!(!generic("fatal").is_contained_by(&candidates).unwrap());
        let list_receiver = generic(Value::list(["mild", "severe"]));
        assert!(list_receiver.is_contained_by(&candidates).unwrap());
    }

    #[test]
    fn tolerant_inequality_tracks_equality() {
        let near = generic(1.000_000_1);
        assert!(!near.num_not_equal_to(&Value::from(1)).unwrap());
    }
}
