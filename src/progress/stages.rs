use std::time::Duration;

use super::Stage;

/// Stages shown while JSON is turned into a spreadsheet preview
pub fn json_to_sheet_stages() -> Vec<Stage> {
    vec![
        Stage::new("Parsing JSON data...", Duration::from_millis(800)),
        Stage::new("Validating data structure...", Duration::from_millis(600)),
        Stage::new("Converting to Excel format...", Duration::from_millis(900)),
        Stage::new("Generating preview...", Duration::from_millis(700)),
    ]
}

/// Stages shown while a spreadsheet is turned into JSON
pub fn sheet_to_json_stages() -> Vec<Stage> {
    vec![
        Stage::new("Reading Excel file...", Duration::from_millis(700)),
        Stage::new("Parsing spreadsheet data...", Duration::from_millis(800)),
        Stage::new("Converting to JSON format...", Duration::from_millis(900)),
        Stage::new("Formatting output...", Duration::from_millis(600)),
    ]
}
