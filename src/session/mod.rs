//! Session and mode controller
//!
//! A [`Session`] holds both panels, remembers which one is active and drives
//! the help overlay. Switching modes never touches a panel's state.

pub mod guide;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::conversion::ConverterConfig;
use crate::panel::{JsonToSheetPanel, SheetToJsonPanel};

pub use guide::{
    guide_steps, AnimationState, GuideOverlay, ENTER_ANIMATION, ENTER_SETTLE, LEAVE_ANIMATION,
};

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionMode {
    #[default]
    JsonToSheet,
    SheetToJson,
}

impl ConversionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::JsonToSheet => "json-to-sheet",
            ConversionMode::SheetToJson => "sheet-to-json",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ConversionMode::JsonToSheet => "JSON to Excel",
            ConversionMode::SheetToJson => "Excel to JSON",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json-to-sheet" | "json-to-excel" => Ok(ConversionMode::JsonToSheet),
            "sheet-to-json" | "excel-to-json" => Ok(ConversionMode::SheetToJson),
            other => Err(format!(
                "Unknown mode '{}'. Use json-to-sheet or sheet-to-json",
                other
            )),
        }
    }
}

pub struct Session {
    mode: ConversionMode,
    json_to_sheet: JsonToSheetPanel,
    sheet_to_json: SheetToJsonPanel,
    guide: GuideOverlay,
}

impl Session {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            mode: ConversionMode::default(),
            json_to_sheet: JsonToSheetPanel::new(config),
            sheet_to_json: SheetToJsonPanel::new(config),
            guide: GuideOverlay::new(),
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn switch_mode(&mut self, mode: ConversionMode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "switching mode");
        }
        self.mode = mode;
    }

    pub fn json_to_sheet(&self) -> &JsonToSheetPanel {
        &self.json_to_sheet
    }

    pub fn json_to_sheet_mut(&mut self) -> &mut JsonToSheetPanel {
        &mut self.json_to_sheet
    }

    pub fn sheet_to_json(&self) -> &SheetToJsonPanel {
        &self.sheet_to_json
    }

    pub fn sheet_to_json_mut(&mut self) -> &mut SheetToJsonPanel {
        &mut self.sheet_to_json
    }

    pub fn guide(&self) -> &GuideOverlay {
        &self.guide
    }

    pub fn open_guide(&mut self, mode: ConversionMode) -> bool {
        self.guide.open(mode)
    }

    pub fn close_guide(&mut self) -> bool {
        self.guide.close()
    }

    /// Move every timer in the session forward by `by`
    pub fn advance(&mut self, by: Duration) {
        self.json_to_sheet.advance(by);
        self.sheet_to_json.advance(by);
        self.guide.advance(by);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&ConverterConfig::default())
    }
}
