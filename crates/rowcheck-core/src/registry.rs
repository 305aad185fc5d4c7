use crate::{
    error::OperatorError,
    fields::FieldKind,
    obs::{self, EngineEvent},
    ops::Output,
    types::Decimal,
    value::Value,
};
use serde::Serialize;

///
/// OperatorSpec
///
/// The catalog record a rule-authoring UI consumes: operator name,
/// display label and the widget kind of its argument.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperatorSpec {
    pub name: &'static str,
    pub label: String,
    pub input_kind: FieldKind,
}

///
/// ScalarOperator
///
/// One registry entry of a scalar operator family: metadata plus the
/// invoker that bridges the uniform dispatch signature onto the
/// family's typed method.
///
/// `auto_coerce` mirrors the family's argument contract: when set,
/// the argument passes through the family coercion before the invoker
/// runs; families that compare heterogeneous values opt out.
///

pub struct ScalarOperator<T> {
    pub name: &'static str,
    pub label: Option<&'static str>,
    pub input_kind: FieldKind,
    pub auto_coerce: bool,
    pub invoke: fn(&T, Option<&Value>) -> Result<Output, OperatorError>,
}

impl<T> ScalarOperator<T> {
    pub(crate) fn spec(&self) -> OperatorSpec {
        OperatorSpec {
            name: self.name,
            label: self
                .label
                .map_or_else(|| pretty_label(self.name), str::to_string),
            input_kind: self.input_kind,
        }
    }
}

/// Derive a display label from an operator name: split on `_`,
/// capitalize the first letter of each token, lowercase the rest.
#[must_use]
pub fn pretty_label(name: &str) -> String {
    name.split('_')
        .map(|token| {
            let mut chars = token.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look an operator up by name, coerce its argument when the entry
/// asks for it, invoke, and report the evaluation to the event sink.
pub(crate) fn dispatch_scalar<T>(
    family: &'static str,
    table: &'static [ScalarOperator<T>],
    receiver: &T,
    name: &str,
    argument: Option<&Value>,
    coerce: fn(&Value) -> Result<Value, OperatorError>,
) -> Result<Output, OperatorError> {
    let entry = table
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| OperatorError::unknown_operator(family, name))?;

    let output = if entry.auto_coerce {
        match argument {
            Some(raw) => {
                let coerced = coerce(raw)?;
                (entry.invoke)(receiver, Some(&coerced))
            }
            None => (entry.invoke)(receiver, None),
        }
    } else {
        (entry.invoke)(receiver, argument)
    }?;

    obs::record(&EngineEvent::Evaluated {
        family,
        operator: entry.name,
    });

    Ok(output)
}

pub(crate) fn specs<T>(table: &[ScalarOperator<T>]) -> Vec<OperatorSpec> {
    table.iter().map(ScalarOperator::spec).collect()
}

// ---- argument extraction ----------------------------------------------

pub(crate) fn require_argument<'a>(
    argument: Option<&'a Value>,
) -> Result<&'a Value, OperatorError> {
    argument.ok_or_else(|| OperatorError::invalid_argument("operator requires an argument"))
}

pub(crate) fn require_text<'a>(argument: Option<&'a Value>) -> Result<&'a str, OperatorError> {
    let value = require_argument(argument)?;
    value
        .as_text()
        .ok_or_else(|| OperatorError::type_mismatch("string", value))
}

pub(crate) fn require_number(argument: Option<&Value>) -> Result<Decimal, OperatorError> {
    let value = require_argument(argument)?;
    value
        .as_number()
        .ok_or_else(|| OperatorError::type_mismatch("numeric", value))
}

pub(crate) fn require_list<'a>(argument: Option<&'a Value>) -> Result<&'a [Value], OperatorError> {
    let value = require_argument(argument)?;
    value
        .as_list()
        .ok_or_else(|| OperatorError::type_mismatch("select", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_capitalize_each_token() {
        assert_eq!(pretty_label("equal_to"), "Equal To");
        assert_eq!(pretty_label("is_not_unique_relationship"), "Is Not Unique Relationship");
        assert_eq!(pretty_label("non_empty"), "Non Empty");
    }

    #[test]
    fn labels_lowercase_token_tails() {
        assert_eq!(pretty_label("MATCHES_regex"), "Matches Regex");
    }
}
