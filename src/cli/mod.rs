//! Command-line interface module

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::{parse_size, DEFAULT_MAX_INPUT_BYTES};
use crate::conversion::{ConversionSummary, ConverterConfig, RowSet};
use crate::error::{ConvertError, ConvertResult, ErrorKind};
use crate::session::ConversionMode;
use crate::toast::{Toast, ToastKind};

pub mod path_mapping;

/// Widest a preview cell may get before it is cut short
const MAX_CELL_WIDTH: usize = 24;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "sheetconv")]
#[command(about = "Convert JSON arrays to spreadsheets and spreadsheets back to JSON")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory that downloads are written into
    #[arg(long, global = true, default_value = ".")]
    pub out_dir: PathBuf,

    /// Skip the simulated progress delays
    #[arg(long, global = true)]
    pub instant: bool,

    /// Output conversion statistics
    #[arg(long, global = true)]
    pub stats: bool,

    /// Maximum input size (e.g., 10MB, 500KB, default: 10MB)
    #[arg(long, global = true)]
    pub max_input_size: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a JSON array of objects into a spreadsheet
    ToSheet {
        /// JSON text or path to a JSON file
        input: Option<String>,
        /// Read JSON from standard input
        #[arg(long)]
        stdin: bool,
        /// Use the built-in sample dataset
        #[arg(long)]
        sample: bool,
        /// Which downloads to write
        #[arg(long, value_enum, default_value_t = SheetFormat::Xlsx)]
        format: SheetFormat,
        /// Print the preview table
        #[arg(long)]
        preview: bool,
    },
    /// Convert an Excel file (or a directory of them) into JSON
    ToJson {
        /// Excel file or directory
        input: PathBuf,
        /// Recursively process directories
        #[arg(long)]
        recursive: bool,
        /// Continue converting other files when one file fails
        #[arg(long)]
        continue_on_error: bool,
        /// Print the JSON output
        #[arg(long)]
        print: bool,
        /// Copy the JSON output to the system clipboard
        #[arg(long)]
        copy: bool,
        /// Render date cells as ISO-8601 text instead of serial numbers
        #[arg(long)]
        iso_dates: bool,
    },
    /// Check JSON input without converting it
    Validate {
        /// JSON text or path to a JSON file
        input: Option<String>,
        /// Read JSON from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Show the step-by-step guide
    Guide {
        #[arg(long, value_enum, default_value_t = GuideMode::JsonToSheet)]
        mode: GuideMode,
    },
}

/// Download formats for `to-sheet`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    #[value(name = "xlsx", alias = "excel")]
    Xlsx,
    #[value(name = "csv")]
    Csv,
    #[value(name = "both")]
    Both,
}

impl SheetFormat {
    pub fn wants_xlsx(self) -> bool {
        matches!(self, SheetFormat::Xlsx | SheetFormat::Both)
    }

    pub fn wants_csv(self) -> bool {
        matches!(self, SheetFormat::Csv | SheetFormat::Both)
    }
}

/// Guide selection for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideMode {
    #[value(name = "json-to-sheet", alias = "json-to-excel")]
    JsonToSheet,
    #[value(name = "sheet-to-json", alias = "excel-to-json")]
    SheetToJson,
}

impl From<GuideMode> for ConversionMode {
    fn from(mode: GuideMode) -> Self {
        match mode {
            GuideMode::JsonToSheet => ConversionMode::JsonToSheet,
            GuideMode::SheetToJson => ConversionMode::SheetToJson,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub converter_config: ConverterConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConvertResult<Self> {
        let converter_config = Self::create_converter_config(&args)?;

        Ok(Self {
            args,
            converter_config,
        })
    }

    fn create_converter_config(args: &Args) -> ConvertResult<ConverterConfig> {
        let max_input_bytes = match &args.max_input_size {
            Some(limit) => parse_size(limit).map_err(ConvertError::configuration)?,
            None => DEFAULT_MAX_INPUT_BYTES,
        };
        let iso_dates = matches!(args.command, Commands::ToJson { iso_dates: true, .. });

        let mut config = ConverterConfig::default()
            .with_max_input_bytes(max_input_bytes)
            .with_dates_as_iso(iso_dates);
        if args.instant {
            config = config.with_time_scale(0.0);
        }

        config.validate().map_err(ConvertError::configuration)?;
        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    pub fn is_instant(&self) -> bool {
        self.args.instant
    }

    pub fn out_dir(&self) -> &PathBuf {
        &self.args.out_dir
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Progress bar counting files in a directory batch
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }

    /// Percentage bar for one simulated conversion run
    pub fn create_stage_bar(quiet: bool) -> indicatif::ProgressBar {
        if quiet {
            return indicatif::ProgressBar::hidden();
        }
        let pb = indicatif::ProgressBar::new(100);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", Self::paint("✓", ToastKind::Success), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", Self::paint("✗", ToastKind::Error), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Announce a toast; errors are shown even in quiet mode
    pub fn show_toast(toast: &Toast, quiet: bool) {
        match toast.kind {
            ToastKind::Success => Self::show_success(&toast.message, quiet),
            ToastKind::Error => Self::show_error(&toast.message),
        }
    }

    fn paint(mark: &str, kind: ToastKind) -> String {
        if !Self::should_use_color() {
            return mark.to_string();
        }
        match kind {
            ToastKind::Success => console::style(mark).green().to_string(),
            ToastKind::Error => console::style(mark).red().to_string(),
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Render rows as a plain text table using the first row's keys
    pub fn render_table(rows: &RowSet) -> String {
        let headers = rows.headers();
        if headers.is_empty() {
            return String::new();
        }

        let cells: Vec<Vec<String>> = (0..rows.len())
            .map(|index| {
                headers
                    .iter()
                    .map(|key| truncate_cell(&cell_text(rows.cell(index, key))))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                cells
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(truncate_cell(header).chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_cells: Vec<String> = headers.iter().map(|h| truncate_cell(h)).collect();
        let mut out = String::new();
        push_table_line(&mut out, &header_cells, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_table_line(&mut out, &rule, &widths);
        for row in &cells {
            push_table_line(&mut out, row, &widths);
        }
        out
    }

    /// Print a conversion summary (if not in quiet mode)
    pub fn show_stats(summary: &ConversionSummary, quiet: bool) {
        if quiet {
            return;
        }
        println!("\nConversion Statistics:");
        println!("Records: {}", summary.records);
        println!("Columns: {}", summary.columns);
        println!("Input size: {}", Self::format_file_size(summary.input_bytes));
        println!("Output size: {}", Self::format_file_size(summary.output_bytes));
        println!(
            "Processing time: {}",
            Self::format_duration(Duration::from_millis(summary.elapsed_ms))
        );
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate_cell(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn push_table_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConvertError) {
    CliUtils::show_error(&error.user_message());

    if let ConvertError::Syntax(parse) = error {
        if let Some(preview) = &parse.input_preview {
            eprintln!("\n{}", preview);
        }
    }

    match error.kind() {
        ErrorKind::Syntax | ErrorKind::Schema | ErrorKind::EmptyInput => {
            eprintln!("\nTip: Use 'sheetconv validate' to check JSON before conversion");
        }
        ErrorKind::InputTooLarge => {
            eprintln!("\nTip: Use --max-input-size to raise the input limit");
        }
        ErrorKind::Format | ErrorKind::Decode => {
            eprintln!("\nTip: Only .xlsx and .xls workbooks can be converted to JSON");
        }
        _ => {}
    }

    eprintln!("\nTry 'sheetconv --help' for usage information.");
}
