use std::time::Duration;

use serde_json::Value;

use crate::codec::{SpreadsheetCodec, XlsxCodec};
use crate::conversion::{ConversionEngine, ConverterConfig, RowSet};
use crate::error::{ConvertError, ConvertResult};
use crate::io::{FileSink, CSV_FILE_NAME, CSV_MIME, XLSX_FILE_NAME, XLSX_MIME};
use crate::progress::{json_to_sheet_stages, Clock, ProgressSimulator, ProgressState, ProgressUpdate};
use crate::sample::sample_json_text;
use crate::toast::{ToastId, ToastQueue};

/// JSON text in, spreadsheet preview and downloads out
pub struct JsonToSheetPanel<C = XlsxCodec> {
    engine: ConversionEngine<C>,
    simulator: ProgressSimulator,
    toasts: ToastQueue,
    json_input: String,
    preview: Option<RowSet>,
    show_preview: bool,
}

impl JsonToSheetPanel<XlsxCodec> {
    pub fn new(config: &ConverterConfig) -> Self {
        Self::with_engine(ConversionEngine::new(config.clone()))
    }
}

impl<C: SpreadsheetCodec> JsonToSheetPanel<C> {
    pub fn with_engine(engine: ConversionEngine<C>) -> Self {
        let config = engine.config();
        let simulator = ProgressSimulator::from_config(json_to_sheet_stages(), config);
        let toasts = ToastQueue::from_config(config);
        Self {
            engine,
            simulator,
            toasts,
            json_input: String::new(),
            preview: None,
            show_preview: false,
        }
    }

    pub fn json_input(&self) -> &str {
        &self.json_input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.json_input = text.into();
    }

    pub fn load_sample_data(&mut self) -> ToastId {
        self.json_input = sample_json_text();
        self.toasts.clear();
        self.toasts.success("Sample data loaded successfully!")
    }

    pub fn clear_json(&mut self) {
        self.json_input.clear();
        self.preview = None;
        self.show_preview = false;
        self.toasts.clear();
    }

    /// Validate the input and, if it holds, play the progress run and show
    /// the preview. A rejected input leaves any earlier preview in place.
    pub fn preview<K: Clock + ?Sized>(&mut self, clock: &mut K) -> ToastId {
        self.preview_with(clock, |_, _| {})
    }

    pub fn preview_with<K, F>(&mut self, clock: &mut K, observer: F) -> ToastId
    where
        K: Clock + ?Sized,
        F: FnMut(&ProgressUpdate, &ProgressState),
    {
        self.toasts.clear();

        let rows = match self.engine.json_text_to_rowset(&self.json_input) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "JSON input rejected");
                return self.toasts.error(input_error_message(&err));
            }
        };

        self.simulator.run(clock, observer);
        self.simulator.reset();

        self.preview = Some(rows);
        self.show_preview = true;
        self.toasts.success("Excel preview generated successfully!")
    }

    pub fn is_preview_shown(&self) -> bool {
        self.show_preview
    }

    pub fn preview_data(&self) -> Option<&RowSet> {
        self.preview.as_ref()
    }

    /// Column names of the preview table (first row's keys)
    pub fn preview_headers(&self) -> Vec<String> {
        self.preview.as_ref().map(RowSet::headers).unwrap_or_default()
    }

    pub fn preview_rows(&self) -> &[Value] {
        self.preview.as_ref().map(RowSet::rows).unwrap_or_default()
    }

    /// Save the preview as `data.xlsx`; nothing happens without a preview
    pub fn download_xlsx(&mut self, sink: &mut dyn FileSink) -> Option<ToastId> {
        let rows = self.preview.as_ref()?;
        let result = self
            .engine
            .rowset_to_spreadsheet_bytes(rows)
            .and_then(|bytes| sink.save(&bytes, XLSX_FILE_NAME, XLSX_MIME));
        Some(self.report(
            result,
            "Excel file downloaded successfully!",
            "Error downloading Excel file",
        ))
    }

    /// Save the preview as `data.csv`; nothing happens without a preview
    pub fn download_csv(&mut self, sink: &mut dyn FileSink) -> Option<ToastId> {
        let rows = self.preview.as_ref()?;
        let result = self
            .engine
            .rowset_to_csv_text(rows)
            .and_then(|csv| sink.save(csv.as_bytes(), CSV_FILE_NAME, CSV_MIME));
        Some(self.report(
            result,
            "CSV file downloaded successfully!",
            "Error downloading CSV file",
        ))
    }

    pub fn back_to_input(&mut self) {
        self.show_preview = false;
        self.preview = None;
        self.toasts.clear();
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn dismiss_toast(&mut self, id: ToastId) {
        self.toasts.dismiss(id);
    }

    pub fn advance(&mut self, by: Duration) {
        self.toasts.advance(by);
    }

    fn report(&mut self, result: ConvertResult<()>, success: &str, failure: &str) -> ToastId {
        match result {
            Ok(()) => self.toasts.success(success),
            Err(err) => {
                tracing::warn!(error = %err, "{}", failure);
                self.toasts.error(failure)
            }
        }
    }
}

fn input_error_message(err: &ConvertError) -> String {
    match err {
        ConvertError::EmptyInput => "Please enter JSON data".to_string(),
        ConvertError::Schema { .. } => {
            "Please provide a valid JSON array with at least one object".to_string()
        }
        ConvertError::Syntax(_) => "Invalid JSON format. Please check your input.".to_string(),
        other => other.user_message(),
    }
}
