//! Built-in sample dataset
//!
//! Parsed once on first use and shared read-only afterwards.

use std::sync::OnceLock;

use serde_json::json;

use crate::conversion::RowSet;

static SAMPLE_ROWS: OnceLock<RowSet> = OnceLock::new();

/// Five employee records covering text, numeric, date-like and boolean columns
pub fn sample_rows() -> &'static RowSet {
    SAMPLE_ROWS.get_or_init(|| {
        RowSet::new(vec![
            json!({"id": 1, "name": "John Doe", "age": 30, "email": "john.doe@example.com",
                   "department": "Engineering", "salary": 75000, "startDate": "2022-01-15", "isActive": true}),
            json!({"id": 2, "name": "Jane Smith", "age": 28, "email": "jane.smith@example.com",
                   "department": "Marketing", "salary": 65000, "startDate": "2021-08-20", "isActive": true}),
            json!({"id": 3, "name": "Mike Johnson", "age": 35, "email": "mike.johnson@example.com",
                   "department": "Sales", "salary": 70000, "startDate": "2020-03-10", "isActive": false}),
            json!({"id": 4, "name": "Sarah Wilson", "age": 32, "email": "sarah.wilson@example.com",
                   "department": "HR", "salary": 68000, "startDate": "2021-11-05", "isActive": true}),
            json!({"id": 5, "name": "David Brown", "age": 29, "email": "david.brown@example.com",
                   "department": "Engineering", "salary": 72000, "startDate": "2022-06-12", "isActive": true}),
        ])
    })
}

/// The sample dataset as 2-space indented JSON text
pub fn sample_json_text() -> String {
    // A RowSet of plain JSON values always serializes
    serde_json::to_string_pretty(sample_rows()).unwrap_or_default()
}
