//! Configuration options for JSON/spreadsheet conversion

use std::time::Duration;

/// Fixed name of the single worksheet written to `data.xlsx`
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Slowest accepted playback of the progress stages
pub const MAX_TIME_SCALE: f64 = 10.0;

/// Input limit used when none is configured (10MB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Worksheet name used when encoding
    pub sheet_name: String,
    /// Spaces per indentation level in JSON output
    pub json_indent: u8,
    /// Maximum accepted input size in bytes (JSON text or spreadsheet file)
    pub max_input_bytes: usize,
    /// Emit date cells as ISO-8601 strings instead of serial numbers
    pub dates_as_iso: bool,
    /// Progress increments per stage
    pub steps_per_stage: u32,
    /// Multiplier applied to every progress stage duration
    pub time_scale: f64,
    /// How long a toast stays visible before its exit animation
    pub toast_visible: Duration,
    /// Exit animation length before a hidden toast is removed
    pub toast_exit: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            json_indent: 2,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            dates_as_iso: false,
            steps_per_stage: 20,
            time_scale: 1.0,
            toast_visible: Duration::from_millis(4000),
            toast_exit: Duration::from_millis(300),
        }
    }
}

impl ConverterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with no simulated delays, for scripted use
    pub fn instant() -> Self {
        Self {
            time_scale: 0.0,
            ..Default::default()
        }
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    pub fn with_max_input_bytes(mut self, limit_bytes: usize) -> Self {
        self.max_input_bytes = limit_bytes;
        self
    }

    pub fn with_dates_as_iso(mut self, enabled: bool) -> Self {
        self.dates_as_iso = enabled;
        self
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_steps_per_stage(mut self, steps: u32) -> Self {
        self.steps_per_stage = steps;
        self
    }

    pub fn with_toast_timing(mut self, visible: Duration, exit: Duration) -> Self {
        self.toast_visible = visible;
        self.toast_exit = exit;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        // Excel limits sheet names to 31 characters
        if self.sheet_name.is_empty() || self.sheet_name.chars().count() > 31 {
            return Err("Sheet name must be 1-31 characters".to_string());
        }

        if self
            .sheet_name
            .chars()
            .any(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        {
            return Err(format!(
                "Sheet name '{}' contains a character Excel does not allow",
                self.sheet_name
            ));
        }

        if self.json_indent > 8 {
            return Err("JSON indent must be 0-8 spaces".to_string());
        }

        if self.max_input_bytes < 1024 {
            return Err("Input size limit must be at least 1KB".to_string());
        }

        if self.steps_per_stage == 0 {
            return Err("Progress needs at least one step per stage".to_string());
        }

        if !(0.0..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err("Time scale must be between 0 and 10".to_string());
        }

        Ok(())
    }
}

/// Parse a human size string (e.g. "10MB", "500KB", "1GB", "2048")
pub fn parse_size(limit: &str) -> Result<usize, String> {
    let limit_str = limit.trim().to_uppercase();
    let invalid = || format!("Invalid size: {}", limit);

    let (digits, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = digits.trim().parse::<f64>().map_err(|_| invalid())?;
    if value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}
