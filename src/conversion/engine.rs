//! Core conversion engine between JSON text, row sets and spreadsheet bytes

use crate::codec::{SpreadsheetCodec, XlsxCodec};
use crate::conversion::config::ConverterConfig;
use crate::conversion::limits;
use crate::conversion::RowSet;
use crate::error::{ConvertError, ConvertResult};
use crate::parser::{rows_from_json_text, InputSource};
use serde::Serialize;
use std::time::Instant;

/// Figures reported after a conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionSummary {
    pub records: usize,
    pub columns: usize,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub elapsed_ms: u64,
}

impl ConversionSummary {
    pub fn new(rows: &RowSet, input_bytes: usize, output_bytes: usize, started: Instant) -> Self {
        Self {
            records: rows.record_count(),
            columns: rows.headers().len(),
            input_bytes: input_bytes as u64,
            output_bytes: output_bytes as u64,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Main conversion engine
pub struct ConversionEngine<C = XlsxCodec> {
    config: ConverterConfig,
    codec: C,
}

impl ConversionEngine<XlsxCodec> {
    /// Create an engine backed by the default workbook codec
    pub fn new(config: ConverterConfig) -> Self {
        let codec = XlsxCodec::new().with_dates_as_iso(config.dates_as_iso);
        Self { config, codec }
    }
}

impl Default for ConversionEngine<XlsxCodec> {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl<C: SpreadsheetCodec> ConversionEngine<C> {
    /// Create an engine with a custom codec
    pub fn with_codec(config: ConverterConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Validate JSON text and turn it into a row set
    pub fn json_text_to_rowset(&self, text: &str) -> ConvertResult<RowSet> {
        limits::check_input_len(text.len(), &self.config)?;
        let rows = rows_from_json_text(text)?;
        tracing::debug!(records = rows.len(), "parsed JSON rows");
        Ok(rows)
    }

    /// Read a source and validate its JSON text
    pub fn json_source_to_rowset(&self, source: &InputSource) -> ConvertResult<RowSet> {
        limits::check_source_size_before_read(source, &self.config)?;
        let text = source.read_text()?;
        self.json_text_to_rowset(&text)
    }

    /// Encode rows as a single-sheet workbook
    pub fn rowset_to_spreadsheet_bytes(&self, rows: &RowSet) -> ConvertResult<Vec<u8>> {
        if rows.is_empty() {
            return Err(ConvertError::encode("no rows to write"));
        }
        let bytes = self.codec.encode(&self.config.sheet_name, rows)?;
        tracing::debug!(bytes = bytes.len(), sheet = %self.config.sheet_name, "encoded workbook");
        Ok(bytes)
    }

    /// Decode the first sheet of a workbook into rows
    pub fn spreadsheet_bytes_to_rowset(&self, bytes: &[u8]) -> ConvertResult<RowSet> {
        limits::check_input_len(bytes.len(), &self.config)?;
        let workbook = self.codec.decode(bytes)?;
        let sheet = workbook.into_first_sheet();
        tracing::debug!(sheet = %sheet.name, records = sheet.rows.len(), "decoded first sheet");
        Ok(sheet.rows)
    }

    /// Comma-delimited text with a header row
    pub fn rowset_to_csv_text(&self, rows: &RowSet) -> ConvertResult<String> {
        self.codec.rows_to_csv(rows)
    }

    /// Indented JSON array
    pub fn rowset_to_json_text(&self, rows: &RowSet) -> ConvertResult<String> {
        let indent = vec![b' '; self.config.json_indent as usize];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        rows.serialize(&mut serializer)
            .map_err(|e| ConvertError::encode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| ConvertError::encode(e.to_string()))
    }

    /// JSON text to workbook bytes in one step, with a summary
    pub fn convert_json_to_spreadsheet(
        &self,
        text: &str,
    ) -> ConvertResult<(Vec<u8>, ConversionSummary)> {
        let started = Instant::now();
        let rows = self.json_text_to_rowset(text)?;
        let bytes = self.rowset_to_spreadsheet_bytes(&rows)?;
        let summary = ConversionSummary::new(&rows, text.len(), bytes.len(), started);
        tracing::info!(records = summary.records, "converted JSON to spreadsheet");
        Ok((bytes, summary))
    }

    /// Workbook bytes to JSON text in one step, with a summary
    pub fn convert_spreadsheet_to_json(
        &self,
        bytes: &[u8],
    ) -> ConvertResult<(String, ConversionSummary)> {
        let started = Instant::now();
        let rows = self.spreadsheet_bytes_to_rowset(bytes)?;
        let json = self.rowset_to_json_text(&rows)?;
        let summary = ConversionSummary::new(&rows, bytes.len(), json.len(), started);
        tracing::info!(records = summary.records, "converted spreadsheet to JSON");
        Ok((json, summary))
    }
}
