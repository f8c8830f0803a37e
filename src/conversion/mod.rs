//! JSON/spreadsheet conversion module
//!
//! This module contains the core conversion logic, configuration, and the
//! row set every direction converts through.

pub mod config;
pub mod engine;
pub mod limits;
pub mod rowset;

pub use config::{ConverterConfig, DEFAULT_SHEET_NAME};
pub use engine::{ConversionEngine, ConversionSummary};
pub use rowset::RowSet;
