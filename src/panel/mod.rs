//! Panel controllers
//!
//! Each panel owns the row set of its conversion direction, its own toast
//! queue and its own progress simulator. Every user action reports its
//! outcome as exactly one toast and never returns an error to the caller.

pub mod json_to_sheet;
pub mod sheet_to_json;

pub use json_to_sheet::JsonToSheetPanel;
pub use sheet_to_json::SheetToJsonPanel;
