use std::time::Duration;

use super::ConversionMode;
use crate::schedule::TimerQueue;

/// Delay before an opening overlay counts as entered
pub const ENTER_SETTLE: Duration = Duration::from_millis(10);
/// How long the enter animation holds the lock after settling
pub const ENTER_ANIMATION: Duration = Duration::from_millis(400);
/// Length of the leave animation
pub const LEAVE_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    Entering,
    Entered,
    Leaving,
    #[default]
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverlayEvent {
    Entered,
    Unlocked,
    Left,
}

/// Help overlay with enter/leave animation phases.
///
/// Requests made while an animation is running are ignored, so at most one
/// transition is ever in flight.
#[derive(Debug, Clone, Default)]
pub struct GuideOverlay {
    state: AnimationState,
    visible: bool,
    animating: bool,
    mode: ConversionMode,
    timers: TimerQueue<OverlayEvent>,
}

impl GuideOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start showing the guide for `mode`. Returns false if ignored.
    pub fn open(&mut self, mode: ConversionMode) -> bool {
        if self.animating {
            tracing::debug!("guide open ignored while animating");
            return false;
        }
        self.mode = mode;
        self.visible = true;
        self.animating = true;
        self.state = AnimationState::Entering;
        self.timers.schedule(ENTER_SETTLE, OverlayEvent::Entered);
        true
    }

    /// Start hiding the guide. Returns false if ignored.
    pub fn close(&mut self) -> bool {
        if self.animating || !self.visible {
            return false;
        }
        self.animating = true;
        self.state = AnimationState::Leaving;
        self.timers.schedule(LEAVE_ANIMATION, OverlayEvent::Left);
        true
    }

    pub fn advance(&mut self, by: Duration) {
        let until = self.timers.now() + by;
        while let Some(event) = self.timers.pop_due(until) {
            match event {
                OverlayEvent::Entered => {
                    self.state = AnimationState::Entered;
                    self.timers.schedule(ENTER_ANIMATION, OverlayEvent::Unlocked);
                }
                OverlayEvent::Unlocked => self.animating = false,
                OverlayEvent::Left => {
                    self.visible = false;
                    self.state = AnimationState::Left;
                    self.animating = false;
                }
            }
        }
        self.timers.settle(until);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn animation_state(&self) -> AnimationState {
        self.state
    }

    /// Mode whose guide is (or was last) shown
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }
}

/// Step-by-step instructions shown in the guide for each direction
pub fn guide_steps(mode: ConversionMode) -> &'static [&'static str] {
    match mode {
        ConversionMode::JsonToSheet => &[
            "Paste a JSON array of objects, or load the sample data",
            "Generate the preview to validate the input",
            "Check the preview table; columns come from the first object's keys",
            "Download the result as Excel (data.xlsx) or CSV (data.csv)",
        ],
        ConversionMode::SheetToJson => &[
            "Upload an Excel file (.xlsx or .xls)",
            "Convert it to JSON; the first sheet is used",
            "Review the formatted JSON output",
            "Download it as data.json or copy it to the clipboard",
        ],
    }
}
