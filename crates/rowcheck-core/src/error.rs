use crate::value::Value;
use thiserror::Error as ThisError;

///
/// OperatorError
///
/// Errors produced by operator construction and dispatch.
///
/// Only coercion failures, malformed argument shapes, registry misses
/// and regex compilation surface as errors. Missing columns, unresolved
/// prefixes and absent relationship keys are data conditions and yield
/// the safe default documented per operator.
///

#[derive(Debug, ThisError)]
pub enum OperatorError {
    #[error("{value} is not a valid {expected} value")]
    TypeMismatch {
        expected: &'static str,
        value: String,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("unknown {family} operator: {name}")]
    UnknownOperator {
        family: &'static str,
        name: String,
    },

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl OperatorError {
    pub(crate) fn type_mismatch(expected: &'static str, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            value: format!("{value:?}"),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn unknown_operator(family: &'static str, name: &str) -> Self {
        Self::UnknownOperator {
            family,
            name: name.to_string(),
        }
    }
}
