//! Input intake and JSON parsing

pub mod directory;
pub mod filter;
pub mod validation;

use crate::error::{ConvertError, ConvertResult, ParseError, ParseResult};
use std::io::Read;
use std::path::PathBuf;

pub use filter::is_spreadsheet_file;
pub use validation::rows_from_json_text;

/// Where converter input comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Raw text given on the command line or pasted
    Text(String),
    /// File on disk
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl InputSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::Text(_) => "text input".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Get the size of the source in bytes (if known before reading)
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            InputSource::Text(s) => Some(s.len() as u64),
            InputSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            InputSource::Stdin => None, // Unknown until read
        }
    }

    /// Read the whole source as UTF-8 text
    pub fn read_text(&self) -> ConvertResult<String> {
        match self {
            InputSource::Text(content) => Ok(content.clone()),
            InputSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| ConvertError::io(e.to_string(), Some(path.clone()))),
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ConvertError::io(format!("Failed to read stdin: {}", e), None))?;
                Ok(buffer)
            }
        }
    }
}

/// Parse JSON text, reporting the failure position
pub fn parse_json_text(content: &str) -> ParseResult<serde_json::Value> {
    serde_json::from_str(content).map_err(|e| {
        let location = (e.line() > 0).then(|| (e.line(), e.column()));
        let error = ParseError::new(format!("Invalid JSON: {}", e), location);
        match location.and_then(|loc| error_preview(content, loc)) {
            Some(preview) => error.with_preview(preview),
            None => error,
        }
    })
}

/// Show the offending line with a caret under the error column
fn error_preview(content: &str, (line, col): (usize, usize)) -> Option<String> {
    let error_line = content.lines().nth(line.checked_sub(1)?)?;
    let caret_at = error_line
        .chars()
        .take(col.saturating_sub(1))
        .count();
    Some(format!("{}\n{}^", error_line, " ".repeat(caret_at)))
}
