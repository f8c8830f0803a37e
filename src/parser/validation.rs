//! JSON text to row set validation

use crate::conversion::RowSet;
use crate::error::{ConvertError, ConvertResult};
use serde_json::Value;

/// Turn JSON text into a row set.
///
/// The text must contain a non-empty JSON array. Elements are accepted as
/// they are; no per-row shape checks are made.
pub fn rows_from_json_text(text: &str) -> ConvertResult<RowSet> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let value = super::parse_json_text(trimmed)?;
    match value {
        Value::Array(rows) if rows.is_empty() => {
            Err(ConvertError::schema("expected at least one row, got an empty array"))
        }
        Value::Array(rows) => Ok(RowSet::new(rows)),
        other => Err(ConvertError::schema(format!(
            "expected a JSON array, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
