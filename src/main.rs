use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use sheetconv::cli::path_mapping::map_input_to_output;
use sheetconv::cli::{handle_error, Args, CliConfig, CliUtils, Commands, GuideMode, SheetFormat};
use sheetconv::conversion::limits::check_source_size_before_read;
use sheetconv::conversion::{ConversionEngine, ConversionSummary, ConverterConfig};
use sheetconv::error::ConvertError;
use sheetconv::io::{DirectorySink, UploadedFile};
use sheetconv::panel::SheetToJsonPanel;
use sheetconv::parser::directory::find_spreadsheet_files;
use sheetconv::parser::InputSource;
use sheetconv::progress::{Clock, ManualClock, ProgressUpdate, SystemClock};
use sheetconv::session::{
    guide_steps, ConversionMode, Session, ENTER_ANIMATION, ENTER_SETTLE, LEAVE_ANIMATION,
};
use sheetconv::toast::{ToastId, ToastKind, ToastQueue};

/// How a command ended, judged by its final toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failed,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(err) => {
            match err.downcast_ref::<ConvertError>() {
                Some(convert_err) => handle_error(convert_err),
                None => CliUtils::show_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<Outcome> {
    let config = CliConfig::from_args(args)?;
    let mut session = Session::new(&config.converter_config);
    let mut clock = make_clock(config.is_instant());

    match config.args.command.clone() {
        Commands::ToSheet {
            input,
            stdin,
            sample,
            format,
            preview,
        } => {
            session.switch_mode(ConversionMode::JsonToSheet);
            let source = if sample {
                None
            } else {
                Some(json_source(input, stdin)?)
            };
            to_sheet(&config, &mut session, clock.as_mut(), source, format, preview)
        }
        Commands::ToJson {
            input,
            recursive,
            continue_on_error,
            print,
            copy,
            ..
        } => {
            session.switch_mode(ConversionMode::SheetToJson);
            if input.is_dir() {
                convert_directory(&config, clock.as_mut(), &input, recursive, continue_on_error)
            } else if input.is_file() {
                to_json(&config, &mut session, clock.as_mut(), &input, print, copy)
            } else {
                bail!("Input path does not exist: {}", input.display())
            }
        }
        Commands::Validate { input, stdin } => validate(&config, json_source(input, stdin)?),
        Commands::Guide { mode } => Ok(show_guide(&mut session, mode)),
    }
}

fn make_clock(instant: bool) -> Box<dyn Clock> {
    if instant {
        Box::new(ManualClock::new())
    } else {
        Box::new(SystemClock::new())
    }
}

/// Work out where JSON text comes from: stdin, inline text or a file path
fn json_source(input: Option<String>, stdin: bool) -> Result<InputSource> {
    if stdin {
        return Ok(InputSource::Stdin);
    }

    let input = input.ok_or_else(|| {
        anyhow!("No input provided. Use --stdin, --sample or provide JSON text or a file path")
    })?;

    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(InputSource::Text(input));
    }

    let path = PathBuf::from(&input);
    if path.is_file() {
        Ok(InputSource::File(path))
    } else {
        Err(anyhow!("Input path does not exist: {}", input))
    }
}

fn to_sheet(
    config: &CliConfig,
    session: &mut Session,
    clock: &mut dyn Clock,
    source: Option<InputSource>,
    format: SheetFormat,
    show_preview: bool,
) -> Result<Outcome> {
    let quiet = config.is_quiet();
    let started = Instant::now();
    let panel = session.json_to_sheet_mut();

    match source {
        None => {
            panel.load_sample_data();
        }
        Some(source) => {
            check_source_size_before_read(&source, &config.converter_config)?;
            panel.set_input(source.read_text()?);
        }
    }
    announce(panel.toasts_mut(), quiet);

    let bar = CliUtils::create_stage_bar(quiet);
    let preview_id = panel.preview_with(clock, |update, _| track(&bar, update));
    announce(panel.toasts_mut(), quiet);
    if outcome_of(panel.toasts(), preview_id) == Outcome::Failed {
        return Ok(Outcome::Failed);
    }

    if show_preview && !quiet {
        if let Some(rows) = panel.preview_data() {
            print!("{}", CliUtils::render_table(rows));
        }
    }

    let mut sink = DirectorySink::new(config.out_dir());
    let mut last = preview_id;
    if format.wants_xlsx() {
        last = panel.download_xlsx(&mut sink).unwrap_or(last);
    }
    if format.wants_csv() {
        last = panel.download_csv(&mut sink).unwrap_or(last);
    }
    announce(panel.toasts_mut(), quiet);

    if config.want_stats() {
        if let Some(rows) = panel.preview_data() {
            let output_bytes = sink
                .written()
                .iter()
                .filter_map(|path| std::fs::metadata(path).ok())
                .map(|meta| meta.len() as usize)
                .sum();
            let summary =
                ConversionSummary::new(rows, panel.json_input().len(), output_bytes, started);
            CliUtils::show_stats(&summary, quiet);
        }
    }

    Ok(outcome_of(panel.toasts(), last))
}

fn to_json(
    config: &CliConfig,
    session: &mut Session,
    clock: &mut dyn Clock,
    input: &Path,
    print: bool,
    copy: bool,
) -> Result<Outcome> {
    let quiet = config.is_quiet();
    let started = Instant::now();

    check_source_size_before_read(
        &InputSource::File(input.to_path_buf()),
        &config.converter_config,
    )?;
    let file = UploadedFile::from_path(input)?;
    let input_bytes = file.len();

    let panel = session.sheet_to_json_mut();
    let upload_id = panel.upload(file);
    announce(panel.toasts_mut(), quiet);
    if outcome_of(panel.toasts(), upload_id) == Outcome::Failed {
        return Ok(Outcome::Failed);
    }

    let bar = CliUtils::create_stage_bar(quiet);
    let convert_id = panel.convert_to_json_with(clock, |update, _| track(&bar, update));
    announce(panel.toasts_mut(), quiet);
    if outcome_of(panel.toasts(), convert_id) == Outcome::Failed {
        return Ok(Outcome::Failed);
    }

    if print {
        println!("{}", panel.json_output());
    }

    let mut sink = DirectorySink::new(config.out_dir());
    let mut last = panel.download_json(&mut sink).unwrap_or(convert_id);
    if copy {
        last = copy_output(panel);
    }
    announce(panel.toasts_mut(), quiet);

    if config.want_stats() {
        if let Some(rows) = panel.rows() {
            let summary =
                ConversionSummary::new(rows, input_bytes, panel.json_output().len(), started);
            CliUtils::show_stats(&summary, quiet);
        }
    }

    Ok(outcome_of(panel.toasts(), last))
}

#[cfg(feature = "clipboard")]
fn copy_output(panel: &mut SheetToJsonPanel) -> ToastId {
    panel.copy_to_clipboard(&mut sheetconv::io::SystemClipboard)
}

#[cfg(not(feature = "clipboard"))]
fn copy_output(panel: &mut SheetToJsonPanel) -> ToastId {
    tracing::warn!("built without clipboard support");
    panel.toasts_mut().error("Failed to copy to clipboard")
}

fn convert_directory(
    config: &CliConfig,
    clock: &mut dyn Clock,
    input_dir: &Path,
    recursive: bool,
    continue_on_error: bool,
) -> Result<Outcome> {
    let quiet = config.is_quiet();
    let files = find_spreadsheet_files(input_dir, recursive)
        .with_context(|| format!("Failed finding Excel files in {}", input_dir.display()))?;

    if files.is_empty() {
        CliUtils::show_warning(
            &format!("No Excel files found in {}", input_dir.display()),
            quiet,
        );
        return Ok(Outcome::Success);
    }

    if !quiet {
        println!("Found {} Excel files", files.len());
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        CliUtils::create_progress_bar(files.len() as u64)
    };

    let mut failures = 0usize;
    for file in &files {
        let relative = file.strip_prefix(input_dir).unwrap_or(file);
        let output = map_input_to_output(input_dir, file, config.out_dir(), "json");
        pb.set_message(relative.display().to_string());

        match convert_single_file(&config.converter_config, clock, file, &output) {
            Ok(records) => pb.suspend(|| {
                CliUtils::show_success(
                    &format!(
                        "{} -> {} ({} records)",
                        relative.display(),
                        output.display(),
                        records
                    ),
                    quiet,
                )
            }),
            Err(e) => {
                pb.suspend(|| {
                    CliUtils::show_error(&format!("Error converting {}: {}", relative.display(), e))
                });
                failures += 1;
                if !continue_on_error {
                    pb.abandon();
                    bail!("Aborting due to conversion error in {}", relative.display());
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failures > 0 {
        CliUtils::show_warning(
            &format!("{} of {} files failed to convert", failures, files.len()),
            quiet,
        );
        return Ok(Outcome::Failed);
    }
    Ok(Outcome::Success)
}

/// Convert one workbook of a batch with its own panel, returning the record count
fn convert_single_file(
    config: &ConverterConfig,
    clock: &mut dyn Clock,
    input: &Path,
    output: &Path,
) -> Result<usize> {
    check_source_size_before_read(&InputSource::File(input.to_path_buf()), config)?;
    let file = UploadedFile::from_path(input)?;

    let mut panel = SheetToJsonPanel::new(config);
    let id = panel.upload(file);
    fail_on_error(panel.toasts(), id)?;
    let id = panel.convert_to_json(clock);
    fail_on_error(panel.toasts(), id)?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, panel.json_output())
        .with_context(|| format!("Could not write {}", output.display()))?;
    Ok(panel.record_count())
}

fn validate(config: &CliConfig, source: InputSource) -> Result<Outcome> {
    let engine = ConversionEngine::new(config.converter_config.clone());
    match engine.json_source_to_rowset(&source) {
        Ok(rows) => {
            CliUtils::show_success(
                &format!(
                    "Valid JSON: {} records, {} columns",
                    rows.record_count(),
                    rows.headers().len()
                ),
                config.is_quiet(),
            );
            Ok(Outcome::Success)
        }
        Err(err) => {
            handle_error(&err);
            Ok(Outcome::Failed)
        }
    }
}

fn show_guide(session: &mut Session, mode: GuideMode) -> Outcome {
    let mode = ConversionMode::from(mode);
    session.switch_mode(mode);
    session.open_guide(mode);
    session.advance(ENTER_SETTLE + ENTER_ANIMATION);

    println!("How to use: {}", mode.title());
    for (index, step) in guide_steps(mode).iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }

    session.close_guide();
    session.advance(LEAVE_ANIMATION);
    Outcome::Success
}

fn track(bar: &ProgressBar, update: &ProgressUpdate) {
    match update {
        ProgressUpdate::StageStarted { message, .. } => bar.set_message(message.clone()),
        ProgressUpdate::Advanced { percent } => bar.set_position(percent.round() as u64),
        ProgressUpdate::Finished => bar.finish_and_clear(),
    }
}

/// Print every toast raised since the last call
fn announce(toasts: &mut ToastQueue, quiet: bool) {
    for toast in toasts.drain_new() {
        CliUtils::show_toast(&toast, quiet);
    }
}

fn outcome_of(toasts: &ToastQueue, id: ToastId) -> Outcome {
    match toasts.get(id).map(|toast| toast.kind) {
        Some(ToastKind::Error) => Outcome::Failed,
        _ => Outcome::Success,
    }
}

fn fail_on_error(toasts: &ToastQueue, id: ToastId) -> Result<()> {
    match toasts.get(id) {
        Some(toast) if toast.kind == ToastKind::Error => Err(anyhow!(toast.message.clone())),
        _ => Ok(()),
    }
}
