//! Simulated multi-stage progress
//!
//! A fixed list of named stages is played back on a [`Clock`]. Each stage
//! gets an even share of `0..=100` and is advanced in equal increments,
//! one per equal time slice. The run has no bearing on how long the real
//! conversion takes.

pub mod clock;
pub mod stages;

use std::time::Duration;

use crate::conversion::config::MAX_TIME_SCALE;
use crate::conversion::ConverterConfig;

pub use clock::{Clock, ManualClock, SystemClock};
pub use stages::{json_to_sheet_stages, sheet_to_json_stages};

/// Increments per stage unless configured otherwise
pub const DEFAULT_STEPS_PER_STAGE: u32 = 20;

/// One named stage of a simulated run
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub message: String,
    pub duration: Duration,
}

impl Stage {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
        }
    }
}

/// What a progress indicator shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    pub stage_message: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorPhase {
    Idle,
    Running { stage: usize, step: u32 },
    Done,
}

/// Notification sent to a run observer
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    StageStarted { index: usize, message: String },
    Advanced { percent: f64 },
    Finished,
}

#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    stages: Vec<Stage>,
    steps_per_stage: u32,
    time_scale: f64,
    phase: SimulatorPhase,
    state: ProgressState,
}

impl ProgressSimulator {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            steps_per_stage: DEFAULT_STEPS_PER_STAGE,
            time_scale: 1.0,
            phase: SimulatorPhase::Idle,
            state: ProgressState::default(),
        }
    }

    pub fn from_config(stages: Vec<Stage>, config: &ConverterConfig) -> Self {
        Self::new(stages)
            .with_steps_per_stage(config.steps_per_stage)
            .with_time_scale(config.time_scale)
    }

    pub fn with_steps_per_stage(mut self, steps: u32) -> Self {
        self.steps_per_stage = steps.max(1);
        self
    }

    /// Stretch or shrink stage durations. Non-finite scales fall back to 1.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = if scale.is_finite() {
            scale.clamp(0.0, MAX_TIME_SCALE)
        } else {
            1.0
        };
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn phase(&self) -> SimulatorPhase {
        self.phase
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SimulatorPhase::Running { .. })
    }

    fn stage_share(&self) -> f64 {
        100.0 / self.stages.len() as f64
    }

    /// Begin a run from zero. With no stages the run is immediately done.
    pub fn start(&mut self) {
        self.state = ProgressState::default();
        match self.stages.first() {
            Some(first) => {
                self.state.stage_message = first.message.clone();
                self.phase = SimulatorPhase::Running { stage: 0, step: 0 };
            }
            None => {
                self.state.percent = 100.0;
                self.phase = SimulatorPhase::Done;
            }
        }
    }

    /// Wait before the next increment, `None` unless running
    pub fn next_delay(&self) -> Option<Duration> {
        match self.phase {
            SimulatorPhase::Running { stage, .. } => {
                let duration = self.stages[stage].duration.mul_f64(self.time_scale);
                Some(duration / self.steps_per_stage)
            }
            _ => None,
        }
    }

    /// Apply one increment and report what changed
    pub fn tick(&mut self) -> Vec<ProgressUpdate> {
        let SimulatorPhase::Running { stage, step } = self.phase else {
            return Vec::new();
        };

        let share = self.stage_share();
        let start = share * stage as f64;
        let end = start + share;
        let increment = share / self.steps_per_stage as f64;
        let step = step + 1;

        self.state.percent = (start + increment * step as f64).min(end);
        let mut updates = vec![ProgressUpdate::Advanced {
            percent: self.state.percent,
        }];

        if step < self.steps_per_stage {
            self.phase = SimulatorPhase::Running { stage, step };
        } else if stage + 1 < self.stages.len() {
            let next = stage + 1;
            self.state.stage_message = self.stages[next].message.clone();
            self.phase = SimulatorPhase::Running {
                stage: next,
                step: 0,
            };
            tracing::debug!(stage = next, message = %self.state.stage_message, "progress stage");
            updates.push(ProgressUpdate::StageStarted {
                index: next,
                message: self.state.stage_message.clone(),
            });
        } else {
            self.state.percent = 100.0;
            self.phase = SimulatorPhase::Done;
            updates.push(ProgressUpdate::Finished);
        }

        updates
    }

    /// Play the whole timeline on `clock`, reporting each change
    pub fn run<C, F>(&mut self, clock: &mut C, mut observer: F)
    where
        C: Clock + ?Sized,
        F: FnMut(&ProgressUpdate, &ProgressState),
    {
        self.start();
        match self.phase {
            SimulatorPhase::Running { .. } => {
                let update = ProgressUpdate::StageStarted {
                    index: 0,
                    message: self.state.stage_message.clone(),
                };
                observer(&update, &self.state);
            }
            _ => observer(&ProgressUpdate::Finished, &self.state),
        }

        while let Some(delay) = self.next_delay() {
            clock.sleep(delay);
            for update in self.tick() {
                observer(&update, &self.state);
            }
        }
    }

    /// Back to `{"", 0}` and idle
    pub fn reset(&mut self) {
        self.phase = SimulatorPhase::Idle;
        self.state = ProgressState::default();
    }
}
