//! Flat rows survive JSON -> workbook -> JSON unchanged

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sheetconv::{json_to_xlsx, parse_rows, xlsx_to_json, ConversionEngine, RowSet};

fn round_trip(rows: &RowSet) -> RowSet {
    let engine = ConversionEngine::default();
    let bytes = engine.rowset_to_spreadsheet_bytes(rows).unwrap();
    engine.spreadsheet_bytes_to_rowset(&bytes).unwrap()
}

#[test]
fn test_mixed_scalar_columns() {
    let rows = RowSet::new(vec![
        json!({"id": 1, "name": "Ann", "ratio": 0.25, "active": true}),
        json!({"id": 2, "name": "Ben", "ratio": -3.5, "active": false}),
        json!({"id": 3, "name": "Cy", "ratio": 1e-3, "active": true}),
    ]);
    assert_eq!(round_trip(&rows), rows);
}

#[test]
fn test_nulls_and_missing_keys_disappear() {
    let rows = RowSet::new(vec![
        json!({"a": 1, "b": null, "c": "x"}),
        json!({"c": "y"}),
    ]);
    let expected = RowSet::new(vec![json!({"a": 1, "c": "x"}), json!({"c": "y"})]);
    assert_eq!(round_trip(&rows), expected);
}

#[test]
fn test_unicode_and_long_text() {
    let long = "lorem ipsum ".repeat(200);
    let rows = RowSet::new(vec![
        json!({"greeting": "héllo wörld ✓", "emoji": "📊", "long": long}),
    ]);
    assert_eq!(round_trip(&rows), rows);
}

#[test]
fn test_large_integers_stay_integral() {
    let rows = RowSet::new(vec![json!({"big": 9_007_199_254_740_991i64, "neg": -42})]);
    assert_eq!(round_trip(&rows), rows);
}

#[test]
fn test_nested_values_come_back_as_text() {
    let rows = RowSet::new(vec![json!({"tags": ["a", "b"], "meta": {"k": 1}})]);
    let decoded = round_trip(&rows);
    assert_eq!(
        decoded.rows()[0],
        json!({"tags": "[\"a\",\"b\"]", "meta": "{\"k\":1}"})
    );
}

#[test]
fn test_key_order_follows_first_row() {
    let rows = RowSet::new(vec![
        json!({"zeta": 1, "alpha": 2, "mid": 3}),
        json!({"mid": 6, "alpha": 5, "zeta": 4}),
    ]);
    let decoded = round_trip(&rows);
    assert_eq!(decoded.headers(), vec!["zeta", "alpha", "mid"]);
    let keys: Vec<&String> = decoded.rows()[1].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_text_helpers_compose() {
    let text = r#"[{"a":1,"b":"two"},{"a":3,"b":"four"}]"#;
    let json = xlsx_to_json(&json_to_xlsx(text).unwrap()).unwrap();

    let original: Value = serde_json::from_str(text).unwrap();
    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, original);
    assert_eq!(parse_rows(&json).unwrap().record_count(), 2);
}
