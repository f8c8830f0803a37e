//! Workbook codec backed by calamine (read) and rust_xlsxwriter (write)

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Workbook as XlsxWorkbook, XlsxError};
use serde_json::{Map, Number, Value};

use super::{delimited, Sheet, SpreadsheetCodec, Workbook, MAX_COLUMNS, MAX_ROWS};
use crate::conversion::RowSet;
use crate::error::{ConvertError, ConvertResult};

/// Key given to a header cell with no text
const EMPTY_HEADER: &str = "__EMPTY";

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Default codec: reads xlsx/xls/xlsb/ods, writes xlsx
#[derive(Debug, Clone, Default)]
pub struct XlsxCodec {
    dates_as_iso: bool,
}

impl XlsxCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit date cells as ISO-8601 text instead of Excel serial numbers
    pub fn with_dates_as_iso(mut self, enabled: bool) -> Self {
        self.dates_as_iso = enabled;
        self
    }

    fn sheet_rows(&self, rows: Vec<&[Data]>) -> RowSet {
        let mut rows = rows.into_iter();
        let headers = match rows.next() {
            Some(header_row) => header_names(header_row),
            None => return RowSet::default(),
        };

        let objects = rows
            .filter_map(|row| {
                let mut object = Map::new();
                for (key, cell) in headers.iter().zip(row.iter()) {
                    if let Some(value) = self.cell_value(cell) {
                        object.insert(key.clone(), value);
                    }
                }
                // Blank rows are skipped
                (!object.is_empty()).then_some(object)
            })
            .collect();

        RowSet::from_objects(objects)
    }

    fn cell_value(&self, cell: &Data) -> Option<Value> {
        match cell {
            Data::Empty => None,
            Data::String(s) => Some(Value::String(s.clone())),
            Data::Int(i) => Some(Value::Number((*i).into())),
            Data::Float(f) => Some(number_value(*f)),
            Data::Bool(b) => Some(Value::Bool(*b)),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if self.dates_as_iso {
                    serial_to_iso(serial)
                        .map(Value::String)
                        .or_else(|| Some(number_value(serial)))
                } else {
                    Some(number_value(serial))
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
            Data::Error(e) => Some(Value::String(e.to_string())),
        }
    }
}

impl SpreadsheetCodec for XlsxCodec {
    fn decode(&self, bytes: &[u8]) -> ConvertResult<Workbook> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| ConvertError::format(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ConvertError::format("workbook contains no sheets"))?;

        // Later sheets are never read
        let range = workbook.worksheet_range(&name).map_err(|e| {
            ConvertError::decode(format!("failed to read sheet '{}': {}", name, e))
        })?;
        let rows = self.sheet_rows(range.rows().collect());
        tracing::debug!(sheet = %name, records = rows.len(), sheets = sheet_names.len(), "decoded sheet");

        Ok(Workbook {
            sheet_names,
            first: Sheet { name, rows },
        })
    }

    fn encode(&self, sheet_name: &str, rows: &RowSet) -> ConvertResult<Vec<u8>> {
        let headers = rows.headers();
        if headers.len() > MAX_COLUMNS {
            return Err(ConvertError::encode(format!(
                "{} columns exceed the sheet limit of {}",
                headers.len(),
                MAX_COLUMNS
            )));
        }
        if rows.len() + 1 > MAX_ROWS {
            return Err(ConvertError::encode(format!(
                "{} rows exceed the sheet limit of {}",
                rows.len(),
                MAX_ROWS - 1
            )));
        }

        let mut workbook = XlsxWorkbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(encode_error)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, header.as_str())
                .map_err(encode_error)?;
        }

        for (index, cells) in rows.aligned_rows().enumerate() {
            let row = (index + 1) as u32;
            for (col, cell) in cells.into_iter().enumerate() {
                let col = col as u16;
                let written = match cell {
                    None | Some(Value::Null) => continue,
                    Some(Value::Bool(b)) => worksheet.write_boolean(row, col, *b),
                    Some(Value::Number(n)) => match n.as_f64() {
                        Some(f) => worksheet.write_number(row, col, f),
                        None => worksheet.write_string(row, col, n.to_string()),
                    },
                    Some(Value::String(s)) => worksheet.write_string(row, col, s.as_str()),
                    Some(nested) => worksheet.write_string(row, col, nested.to_string()),
                };
                written.map_err(encode_error)?;
            }
        }

        workbook.save_to_buffer().map_err(encode_error)
    }

    fn rows_to_csv(&self, rows: &RowSet) -> ConvertResult<String> {
        delimited::rows_to_csv(rows)
    }
}

fn encode_error(err: XlsxError) -> ConvertError {
    ConvertError::encode(err.to_string())
}

/// Name header cells; blanks become `__EMPTY`, repeats get `_1`, `_2`, ...
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .map(|cell| {
            let base = match cell {
                Data::Empty => EMPTY_HEADER.to_string(),
                Data::Float(f) => number_value(*f).to_string(),
                Data::Bool(b) => delimited::bool_text(*b).to_string(),
                other => {
                    let text = other.to_string();
                    if text.is_empty() {
                        EMPTY_HEADER.to_string()
                    } else {
                        text
                    }
                }
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Integral floats become JSON integers so `1` survives a round trip
fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        Value::Number(Number::from(f as i64))
    } else {
        Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string()))
    }
}

/// Excel serial (1900 system) to `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
fn serial_to_iso(serial: f64) -> Option<String> {
    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let moment = epoch.checked_add_signed(chrono::Duration::milliseconds(millis))?;
    if moment.time() == chrono::NaiveTime::MIN {
        Some(moment.format("%Y-%m-%d").to_string())
    } else {
        Some(moment.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}
