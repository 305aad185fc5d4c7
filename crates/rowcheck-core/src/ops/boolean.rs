use crate::{
    error::OperatorError,
    fields::FieldKind,
    ops::Output,
    registry::{self, OperatorSpec, ScalarOperator},
    value::{Value, coerce_boolean},
};

///
/// BooleanOps
///
/// Operator family over a strict boolean. Truthy stand-ins are
/// rejected at construction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BooleanOps {
    value: bool,
}

impl BooleanOps {
    pub const FAMILY: &'static str = "boolean";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        match coerce_boolean(value)? {
            Value::Bool(flag) => Ok(Self { value: flag }),
            other => Err(OperatorError::type_mismatch("boolean", &other)),
        }
    }

    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(Self::FAMILY, OPERATORS, self, name, argument, coerce_boolean)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(OPERATORS)
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        self.value
    }

    #[must_use]
    pub const fn is_false(&self) -> bool {
        !self.value
    }
}

const OPERATORS: &[ScalarOperator<BooleanOps>] = &[
    ScalarOperator {
        name: "is_true",
        label: None,
        input_kind: FieldKind::NoInput,
        auto_coerce: true,
        invoke: |ops, _| Ok(Output::Bool(ops.is_true())),
    },
    ScalarOperator {
        name: "is_false",
        label: None,
        input_kind: FieldKind::NoInput,
        auto_coerce: true,
        invoke: |ops, _| Ok(Output::Bool(ops.is_false())),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_construction() {
        assert!(BooleanOps::new(&Value::Bool(true)).is_ok());
        assert!(BooleanOps::new(&Value::from(1)).is_err());
        assert!(BooleanOps::new(&Value::from("true")).is_err());
        assert!(BooleanOps::new(&Value::Null).is_err());
    }

    #[test]
    fn the_two_verdicts_are_complements() {
        let ops = BooleanOps::new(&Value::Bool(false)).unwrap();
        assert!(ops.is_false());
        assert!(!ops.is_true());
        assert_eq!(ops.evaluate("is_false", None).unwrap(), Output::Bool(true));
    }
}
