use std::time::Duration;

use crate::codec::{SpreadsheetCodec, XlsxCodec};
use crate::conversion::{ConversionEngine, ConverterConfig, RowSet};
use crate::io::{ClipboardSink, FileSink, UploadedFile, JSON_FILE_NAME, JSON_MIME};
use crate::parser::is_spreadsheet_file;
use crate::progress::{sheet_to_json_stages, Clock, ProgressSimulator, ProgressState, ProgressUpdate};
use crate::toast::{ToastId, ToastQueue};

/// Spreadsheet file in, JSON text out
pub struct SheetToJsonPanel<C = XlsxCodec> {
    engine: ConversionEngine<C>,
    simulator: ProgressSimulator,
    toasts: ToastQueue,
    uploaded: Option<UploadedFile>,
    file_name: String,
    rows: Option<RowSet>,
    json_output: String,
    show_json_output: bool,
}

impl SheetToJsonPanel<XlsxCodec> {
    pub fn new(config: &ConverterConfig) -> Self {
        Self::with_engine(ConversionEngine::new(config.clone()))
    }
}

impl<C: SpreadsheetCodec> SheetToJsonPanel<C> {
    pub fn with_engine(engine: ConversionEngine<C>) -> Self {
        let config = engine.config();
        let simulator = ProgressSimulator::from_config(sheet_to_json_stages(), config);
        let toasts = ToastQueue::from_config(config);
        Self {
            engine,
            simulator,
            toasts,
            uploaded: None,
            file_name: String::new(),
            rows: None,
            json_output: String::new(),
            show_json_output: false,
        }
    }

    /// Admit a file by name; a new upload discards the previous output
    pub fn upload(&mut self, file: UploadedFile) -> ToastId {
        self.toasts.clear();

        if !is_spreadsheet_file(&file.name) {
            tracing::warn!(file = %file.name, "rejected non-spreadsheet upload");
            return self
                .toasts
                .error("Please select a valid Excel file (.xlsx or .xls)");
        }

        tracing::debug!(file = %file.name, bytes = file.len(), "file uploaded");
        self.file_name = file.name.clone();
        self.uploaded = Some(file);
        self.show_json_output = false;
        self.json_output.clear();
        self.rows = None;
        self.toasts
            .success("Excel file uploaded successfully! Click \"Convert to JSON\" to proceed.")
    }

    pub fn convert_to_json<K: Clock + ?Sized>(&mut self, clock: &mut K) -> ToastId {
        self.convert_to_json_with(clock, |_, _| {})
    }

    /// Play the progress run, then decode the uploaded file. A failed
    /// decode leaves the previous output untouched.
    pub fn convert_to_json_with<K, F>(&mut self, clock: &mut K, observer: F) -> ToastId
    where
        K: Clock + ?Sized,
        F: FnMut(&ProgressUpdate, &ProgressState),
    {
        let Some(file) = &self.uploaded else {
            return self.toasts.error("No file uploaded");
        };

        self.toasts.clear();
        self.simulator.run(clock, observer);

        let result = self
            .engine
            .spreadsheet_bytes_to_rowset(&file.bytes)
            .and_then(|rows| {
                let json = self.engine.rowset_to_json_text(&rows)?;
                Ok((rows, json))
            });
        self.simulator.reset();

        match result {
            Ok((rows, json)) => {
                tracing::info!(file = %self.file_name, records = rows.len(), "converted to JSON");
                self.rows = Some(rows);
                self.json_output = json;
                self.show_json_output = true;
                self.toasts
                    .success("Excel file converted to JSON successfully!")
            }
            Err(err) => {
                tracing::warn!(file = %self.file_name, error = %err, "conversion failed");
                self.toasts
                    .error("Error reading Excel file. Please check the file format.")
            }
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_file_uploaded(&self) -> bool {
        self.uploaded.is_some()
    }

    pub fn is_json_output_shown(&self) -> bool {
        self.show_json_output
    }

    pub fn json_output(&self) -> &str {
        &self.json_output
    }

    pub fn rows(&self) -> Option<&RowSet> {
        self.rows.as_ref()
    }

    pub fn record_count(&self) -> usize {
        self.rows.as_ref().map_or(0, RowSet::record_count)
    }

    /// Save the output as `data.json`; nothing happens without output
    pub fn download_json(&mut self, sink: &mut dyn FileSink) -> Option<ToastId> {
        let rows = self.rows.as_ref()?;
        let result = self
            .engine
            .rowset_to_json_text(rows)
            .and_then(|json| sink.save(json.as_bytes(), JSON_FILE_NAME, JSON_MIME));

        Some(match result {
            Ok(()) => self.toasts.success("JSON file downloaded successfully!"),
            Err(err) => {
                tracing::warn!(error = %err, "JSON download failed");
                self.toasts.error("Error downloading JSON file")
            }
        })
    }

    pub fn copy_to_clipboard(&mut self, clipboard: &mut dyn ClipboardSink) -> ToastId {
        match clipboard.copy_text(&self.json_output) {
            Ok(()) => self.toasts.success("JSON copied to clipboard!"),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.toasts.error("Failed to copy to clipboard")
            }
        }
    }

    pub fn back_to_upload(&mut self) {
        self.show_json_output = false;
        self.uploaded = None;
        self.file_name.clear();
        self.json_output.clear();
        self.rows = None;
        self.toasts.clear();
    }

    pub fn new_upload(&mut self) {
        self.back_to_upload();
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
}
