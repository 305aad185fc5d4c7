use crate::{
    error::OperatorError,
    fields::FieldKind,
    ops::Output,
    registry::{self, OperatorSpec, ScalarOperator, require_number},
    types::Decimal,
    value::{Value, coerce_numeric},
};

///
/// NumericOps
///
/// Operator family over one arbitrary-precision decimal. Equality is
/// tolerant within `Decimal::EPSILON`; the strict comparisons require
/// the difference to exceed it, so a pair of values can be neither
/// equal nor ordered only when exactly EPSILON apart.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NumericOps {
    value: Decimal,
}

impl NumericOps {
    pub const FAMILY: &'static str = "numeric";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        match coerce_numeric(value)? {
            Value::Number(number) => Ok(Self { value: number }),
            other => Err(OperatorError::type_mismatch("numeric", &other)),
        }
    }

    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(Self::FAMILY, OPERATORS, self, name, argument, coerce_numeric)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(OPERATORS)
    }

    #[must_use]
    pub fn equal_to(&self, other: Decimal) -> bool {
        self.value.eq_within_epsilon(other)
    }

    #[must_use]
    pub fn not_equal_to(&self, other: Decimal) -> bool {
        !self.equal_to(other)
    }

    #[must_use]
    pub fn greater_than(&self, other: Decimal) -> bool {
        self.value.exceeds_by_epsilon(other)
    }

    #[must_use]
    pub fn greater_than_or_equal_to(&self, other: Decimal) -> bool {
        self.greater_than(other) || self.equal_to(other)
    }

    #[must_use]
    pub fn less_than(&self, other: Decimal) -> bool {
        other.exceeds_by_epsilon(self.value)
    }

    #[must_use]
    pub fn less_than_or_equal_to(&self, other: Decimal) -> bool {
        self.less_than(other) || self.equal_to(other)
    }
}

const OPERATORS: &[ScalarOperator<NumericOps>] = &[
    ScalarOperator {
        name: "equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.equal_to(require_number(arg)?))),
    },
    ScalarOperator {
        name: "not_equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.not_equal_to(require_number(arg)?))),
    },
    ScalarOperator {
        name: "greater_than",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.greater_than(require_number(arg)?))),
    },
    ScalarOperator {
        name: "greater_than_or_equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.greater_than_or_equal_to(require_number(arg)?))),
    },
    ScalarOperator {
        name: "less_than",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.less_than(require_number(arg)?))),
    },
    ScalarOperator {
        name: "less_than_or_equal_to",
        label: None,
        input_kind: FieldKind::Numeric,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.less_than_or_equal_to(require_number(arg)?))),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(value: f64) -> NumericOps {
        NumericOps::new(&Value::from(value)).unwrap()
    }

    #[test]
    fn equality_is_tolerant_within_epsilon() {
        assert!(ops(1.000_000_1).equal_to(Decimal::from(1)));
        assert!(!ops(1.001).equal_to(Decimal::from(1)));
    }

    #[test]
    fn values_within_epsilon_are_neither_greater_nor_less() {
        let one = Decimal::from(1);
        let near = ops(1.000_000_1);
        assert!(!near.greater_than(one));
        assert!(!near.less_than(one));
        assert!(near.greater_than_or_equal_to(one));
        assert!(near.less_than_or_equal_to(one));
    }

    #[test]
    fn strict_comparisons_need_a_gap_beyond_epsilon() {
        assert!(ops(1.001).greater_than(Decimal::from(1)));
        assert!(ops(0.999).less_than(Decimal::from(1)));
        assert!(!ops(0.999).greater_than(Decimal::from(1)));
    }

    #[test]
    fn numeric_text_is_rejected() {
        assert!(NumericOps::new(&Value::from("1")).is_err());
        let one = ops(1.0);
        assert!(matches!(
            one.evaluate("equal_to", Some(&Value::from("1"))),
            Err(OperatorError::TypeMismatch { .. })
        ));
    }
}
