//! Per-family value coercion.
//!
//! Each operator family validates raw inputs through exactly one of
//! these functions, both at construction and (when the registry entry
//! opts in) for every operator argument. All coercions are idempotent.

use crate::{error::OperatorError, value::Value};

/// Strings accept text; a missing value becomes the empty string.
pub fn coerce_string(value: &Value) -> Result<Value, OperatorError> {
    match value {
        Value::Null => Ok(Value::Text(String::new())),
        Value::Text(_) => Ok(value.clone()),
        other => Err(OperatorError::type_mismatch("string", other)),
    }
}

/// Numerics accept numbers only; numeric-looking text fails.
pub fn coerce_numeric(value: &Value) -> Result<Value, OperatorError> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        other => Err(OperatorError::type_mismatch("numeric", other)),
    }
}

/// Booleans are strict: only the two boolean constants pass.
pub fn coerce_boolean(value: &Value) -> Result<Value, OperatorError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        other => Err(OperatorError::type_mismatch("boolean", other)),
    }
}

/// Select families accept any collection.
pub fn coerce_select(value: &Value) -> Result<Value, OperatorError> {
    match value {
        Value::List(_) => Ok(value.clone()),
        other => Err(OperatorError::type_mismatch("select", other)),
    }
}

/// The generic family accepts anything; text and numbers keep their
/// canonical form and every other kind passes through unchanged.
pub fn coerce_generic(value: &Value) -> Result<Value, OperatorError> {
    Ok(value.clone())
}
