//! CSV rendering of a row set

use serde_json::Value;

use crate::conversion::RowSet;
use crate::error::{ConvertError, ConvertResult};

/// Render rows as comma-delimited text. The header row comes from the
/// first row's keys; missing keys and nulls become empty fields.
pub fn rows_to_csv(rows: &RowSet) -> ConvertResult<String> {
    let headers = rows.headers();
    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(|e| ConvertError::encode(e.to_string()))?;

    for cells in rows.aligned_rows() {
        let record: Vec<String> = cells.into_iter().map(field_text).collect();
        writer
            .write_record(&record)
            .map_err(|e| ConvertError::encode(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConvertError::encode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ConvertError::encode(e.to_string()))
}

/// Spreadsheet spelling of a boolean
pub(crate) fn bool_text(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => bool_text(*b).to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(nested) => nested.to_string(),
    }
}
