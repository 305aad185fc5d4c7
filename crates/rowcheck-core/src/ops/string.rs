use crate::{
    error::OperatorError,
    fields::FieldKind,
    ops::{MatchSpan, Output},
    registry::{self, OperatorSpec, ScalarOperator, require_text},
    value::{Value, coerce_string},
};
use regex::Regex;

///
/// StringOps
///
/// Operator family over a single text value. A missing receiver
/// coerces to the empty string, so every operator is total.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringOps {
    value: String,
}

impl StringOps {
    pub const FAMILY: &'static str = "string";

    pub fn new(value: &Value) -> Result<Self, OperatorError> {
        match coerce_string(value)? {
            Value::Text(text) => Ok(Self { value: text }),
            other => Err(OperatorError::type_mismatch("string", &other)),
        }
    }

    /// Dispatch an operator by registry name.
    pub fn evaluate(&self, name: &str, argument: Option<&Value>) -> Result<Output, OperatorError> {
        registry::dispatch_scalar(Self::FAMILY, OPERATORS, self, name, argument, coerce_string)
    }

    #[must_use]
    pub fn all_operators() -> Vec<OperatorSpec> {
        registry::specs(OPERATORS)
    }

    #[must_use]
    pub fn equal_to(&self, other: &str) -> bool {
        self.value == other
    }

    #[must_use]
    pub fn not_equal_to(&self, other: &str) -> bool {
        self.value != other
    }

    #[must_use]
    pub fn equal_to_case_insensitive(&self, other: &str) -> bool {
        self.value.to_lowercase() == other.to_lowercase()
    }

    #[must_use]
    pub fn starts_with(&self, other: &str) -> bool {
        self.value.starts_with(other)
    }

    #[must_use]
    pub fn ends_with(&self, other: &str) -> bool {
        self.value.ends_with(other)
    }

    #[must_use]
    pub fn contains(&self, other: &str) -> bool {
        self.value.contains(other)
    }

    /// Search semantics: the first hit anywhere in the receiver.
    pub fn matches_regex(&self, pattern: &str) -> Result<Option<MatchSpan>, OperatorError> {
        let regex = Regex::new(pattern)?;
        Ok(regex.find(&self.value).map(|m| MatchSpan {
            start: m.start(),
            end: m.end(),
        }))
    }

    #[must_use]
    pub fn non_empty(&self) -> bool {
        !self.value.is_empty()
    }
}

const OPERATORS: &[ScalarOperator<StringOps>] = &[
    ScalarOperator {
        name: "equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.equal_to(require_text(arg)?))),
    },
    ScalarOperator {
        name: "not_equal_to",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.not_equal_to(require_text(arg)?))),
    },
    ScalarOperator {
        name: "equal_to_case_insensitive",
        label: Some("Equal To (case insensitive)"),
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.equal_to_case_insensitive(require_text(arg)?))),
    },
    ScalarOperator {
        name: "starts_with",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.starts_with(require_text(arg)?))),
    },
    ScalarOperator {
        name: "ends_with",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.ends_with(require_text(arg)?))),
    },
    ScalarOperator {
        name: "contains",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Bool(ops.contains(require_text(arg)?))),
    },
    ScalarOperator {
        name: "matches_regex",
        label: None,
        input_kind: FieldKind::Text,
        auto_coerce: true,
        invoke: |ops, arg| Ok(Output::Match(ops.matches_regex(require_text(arg)?)?)),
    },
    ScalarOperator {
        name: "non_empty",
        label: None,
        input_kind: FieldKind::NoInput,
        auto_coerce: true,
        invoke: |ops, _| Ok(Output::Bool(ops.non_empty())),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(s: &str) -> StringOps {
        StringOps::new(&Value::from(s)).unwrap()
    }

    #[test]
    fn null_receiver_becomes_the_empty_string() {
        let ops = StringOps::new(&Value::Null).unwrap();
        assert!(!ops.non_empty());
        assert!(ops.equal_to(""));
    }

    #[test]
    fn affix_and_substring_predicates() {
        let ops = ops("AESEV");
        assert!(ops.starts_with("AE"));
        assert!(ops.ends_with("SEV"));
        assert!(ops.contains("ESE"));
        assert!(!ops.contains("ese"));
    }

    #[test]
    fn case_insensitive_equality() {
        assert!(ops("Mild").equal_to_case_insensitive("MILD"));
        assert!(!ops("Mild").equal_to("MILD"));
    }

    #[test]
    fn regex_search_reports_the_span() {
        let span = ops("XYZ123").matches_regex(r"\d+").unwrap().unwrap();
        assert_eq!((span.start, span.end), (3, 6));
        assert!(ops("XYZ").matches_regex(r"\d+").unwrap().is_none());
    }

    #[test]
    fn invalid_patterns_propagate() {
        assert!(matches!(
            ops("x").matches_regex("("),
            Err(OperatorError::Regex(_))
        ));
    }

    #[test]
    fn dispatch_coerces_arguments() {
        let ops = ops("");
        // Null argument coerces to "" under the string contract.
        let out = ops.evaluate("equal_to", Some(&Value::Null)).unwrap();
        assert_eq!(out, Output::Bool(true));
        assert!(matches!(
            ops.evaluate("equal_to", Some(&Value::from(1))),
            Err(OperatorError::TypeMismatch { .. })
        ));
        assert!(matches!(
            ops.evaluate("no_such_operator", None),
            Err(OperatorError::UnknownOperator { .. })
        ));
    }

    #[test]
    fn catalog_lists_every_operator_with_labels() {
        let specs = StringOps::all_operators();
        assert_eq!(specs.len(), OPERATORS.len());
        let equal_to_ci = specs
            .iter()
            .find(|s| s.name == "equal_to_case_insensitive")
            .unwrap();
        assert_eq!(equal_to_ci.label, "Equal To (case insensitive)");
        let starts_with = specs.iter().find(|s| s.name == "starts_with").unwrap();
        assert_eq!(starts_with.label, "Starts With");
    }
}
