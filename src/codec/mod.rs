//! Spreadsheet codec collaborator
//!
//! The conversion engine never touches workbook bytes directly; it goes
//! through [`SpreadsheetCodec`], which turns bytes into the first sheet's row
//! objects and row objects back into a single-sheet workbook or CSV text.

pub mod delimited;
pub mod xlsx;

use crate::conversion::RowSet;
use crate::error::ConvertResult;

pub use xlsx::XlsxCodec;

/// Largest sheet Excel can open
pub const MAX_COLUMNS: usize = 16_384;
pub const MAX_ROWS: usize = 1_048_576;

/// One decoded worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: RowSet,
}

/// Decoded workbook: the first sheet in full, every sheet by name
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheet_names: Vec<String>,
    pub first: Sheet,
}

impl Workbook {
    pub fn into_first_sheet(self) -> Sheet {
        self.first
    }
}

/// Byte-level spreadsheet encode/decode
pub trait SpreadsheetCodec {
    /// Parse a workbook container, decoding only its first sheet into row objects
    fn decode(&self, bytes: &[u8]) -> ConvertResult<Workbook>;

    /// Write `rows` as a single-sheet workbook
    fn encode(&self, sheet_name: &str, rows: &RowSet) -> ConvertResult<Vec<u8>>;

    /// Render `rows` as comma-delimited text with a header row
    fn rows_to_csv(&self, rows: &RowSet) -> ConvertResult<String>;
}
