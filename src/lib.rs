//! JSON ⇄ spreadsheet converter
//!
//! Turns JSON arrays of flat objects into single-sheet workbooks (and CSV),
//! and the first sheet of an Excel workbook back into indented JSON. The
//! panels wrap each direction with simulated progress and toast feedback.

pub mod cli;
pub mod codec;
pub mod conversion;
pub mod error;
pub mod io;
pub mod panel;
pub mod parser;
pub mod progress;
pub mod sample;
pub mod schedule;
pub mod session;
pub mod toast;

// Re-export commonly used types
pub use codec::{SpreadsheetCodec, XlsxCodec};
pub use conversion::{ConversionEngine, ConversionSummary, ConverterConfig, RowSet};
pub use error::{ConvertError, ConvertResult, ErrorKind, ParseError};
pub use panel::{JsonToSheetPanel, SheetToJsonPanel};
pub use parser::InputSource;
pub use progress::{ProgressSimulator, ProgressState};
pub use session::{ConversionMode, Session};
pub use toast::{Toast, ToastId, ToastKind, ToastQueue};

/// Parse JSON text into rows with the default configuration
pub fn parse_rows(text: &str) -> ConvertResult<RowSet> {
    ConversionEngine::default().json_text_to_rowset(text)
}

/// Encode JSON text as `.xlsx` bytes with the default configuration
pub fn json_to_xlsx(text: &str) -> ConvertResult<Vec<u8>> {
    let engine = ConversionEngine::default();
    let rows = engine.json_text_to_rowset(text)?;
    engine.rowset_to_spreadsheet_bytes(&rows)
}

/// Decode the first sheet of a workbook into indented JSON text
pub fn xlsx_to_json(bytes: &[u8]) -> ConvertResult<String> {
    let engine = ConversionEngine::default();
    let rows = engine.spreadsheet_bytes_to_rowset(bytes)?;
    engine.rowset_to_json_text(&rows)
}
