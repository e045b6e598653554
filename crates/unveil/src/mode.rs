#![forbid(unsafe_code)]

//! Trigger modes.
//!
//! Each mode is its own handler type; [`ModeController`] dispatches host
//! signals to the active one. Handlers never touch the driver or the timer
//! queue directly: they return [`Directive`]s that the owning component
//! applies, so every start/stop path goes through one place that also
//! cancels timers.
//!
//! | Mode  | Starts a cycle on            | After natural completion        |
//! |-------|------------------------------|---------------------------------|
//! | hover | pointer enter (when idle)    | halt (restore, clear revealed)  |
//! | view  | first visibility >= threshold| stay on the revealed text       |
//! | loop  | timer after entering idle    | hold, reset, pause, start again |

use std::time::Duration;

use crate::config::{AnimateOn, LoopTiming};

/// Whether the component considers itself triggered.
///
/// Distinct from the driver's cycle state: a view-mode component stays
/// `Active` after its cycle has finished, and a loop-mode component is
/// `Active` through the hold period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Idle,
    Active,
}

/// Delayed loop-mode transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStep {
    /// Start a fresh cycle.
    Start,
    /// Put the target back and go idle.
    Reset,
}

/// What a mode handler asks the component to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Begin a cycle and its tick interval.
    Start,
    /// Cancel the tick interval, restore the target, clear revealed, go idle.
    Halt,
    /// Replace any pending delayed transition with `step` after `delay`.
    Schedule(Duration, LoopStep),
}

/// Hover mode: pointer enter starts, pointer leave and completion halt.
#[derive(Debug, Clone, Default)]
pub struct HoverTrigger;

impl HoverTrigger {
    fn pointer_enter(&mut self, activation: Activation) -> Vec<Directive> {
        match activation {
            Activation::Idle => vec![Directive::Start],
            Activation::Active => Vec::new(),
        }
    }

    fn pointer_leave(&mut self, activation: Activation) -> Vec<Directive> {
        match activation {
            Activation::Active => vec![Directive::Halt],
            Activation::Idle => Vec::new(),
        }
    }

    fn cycle_complete(&mut self) -> Vec<Directive> {
        vec![Directive::Halt]
    }
}

/// View mode: one cycle the first time the element is visible enough.
#[derive(Debug, Clone)]
pub struct ViewTrigger {
    threshold: f32,
    has_animated: bool,
}

impl ViewTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            has_animated: false,
        }
    }

    /// Whether the single view-triggered cycle has already been started.
    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    fn visibility(&mut self, ratio: f32) -> Vec<Directive> {
        if self.has_animated || !(ratio > 0.0 && ratio >= self.threshold) {
            return Vec::new();
        }
        self.has_animated = true;
        vec![Directive::Start]
    }
}

/// Where a loop-mode component is in its repeat cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting to start a cycle.
    Waiting,
    /// A cycle is scrambling.
    Running,
    /// Cycle finished; showing the target until the reset.
    Holding,
}

/// Loop mode: start, hold, reset, pause, repeat.
#[derive(Debug, Clone)]
pub struct LoopTrigger {
    timing: LoopTiming,
    phase: LoopPhase,
    completed_cycles: u64,
}

impl LoopTrigger {
    pub fn new(timing: LoopTiming) -> Self {
        Self {
            timing,
            phase: LoopPhase::Waiting,
            completed_cycles: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Cycles that ran to completion since the mode was entered.
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    fn enter(&mut self) -> Vec<Directive> {
        self.phase = LoopPhase::Waiting;
        vec![Directive::Schedule(self.timing.initial_delay, LoopStep::Start)]
    }

    fn cycle_complete(&mut self) -> Vec<Directive> {
        self.phase = LoopPhase::Holding;
        self.completed_cycles += 1;
        vec![Directive::Schedule(self.timing.hold, LoopStep::Reset)]
    }

    fn step(&mut self, step: LoopStep) -> Vec<Directive> {
        match step {
            LoopStep::Start => {
                self.phase = LoopPhase::Running;
                vec![Directive::Start]
            }
            LoopStep::Reset => {
                self.phase = LoopPhase::Waiting;
                vec![
                    Directive::Halt,
                    Directive::Schedule(self.timing.pause, LoopStep::Start),
                ]
            }
        }
    }
}

/// The active trigger mode and its private state.
#[derive(Debug, Clone)]
pub enum ModeController {
    Hover(HoverTrigger),
    View(ViewTrigger),
    Loop(LoopTrigger),
}

impl ModeController {
    /// Fresh handler for `mode`.
    pub fn new(mode: AnimateOn, visibility_threshold: f32, timing: LoopTiming) -> Self {
        match mode {
            AnimateOn::Hover => Self::Hover(HoverTrigger),
            AnimateOn::View => Self::View(ViewTrigger::new(visibility_threshold)),
            AnimateOn::Loop => Self::Loop(LoopTrigger::new(timing)),
        }
    }

    pub fn kind(&self) -> AnimateOn {
        match self {
            Self::Hover(_) => AnimateOn::Hover,
            Self::View(_) => AnimateOn::View,
            Self::Loop(_) => AnimateOn::Loop,
        }
    }

    /// Directives to run when the component mounts or switches into this mode.
    pub fn enter(&mut self) -> Vec<Directive> {
        match self {
            Self::Loop(l) => l.enter(),
            Self::Hover(_) | Self::View(_) => Vec::new(),
        }
    }

    pub fn pointer_enter(&mut self, activation: Activation) -> Vec<Directive> {
        match self {
            Self::Hover(h) => h.pointer_enter(activation),
            Self::View(_) | Self::Loop(_) => Vec::new(),
        }
    }

    pub fn pointer_leave(&mut self, activation: Activation) -> Vec<Directive> {
        match self {
            Self::Hover(h) => h.pointer_leave(activation),
            Self::View(_) | Self::Loop(_) => Vec::new(),
        }
    }

    pub fn visibility(&mut self, ratio: f32) -> Vec<Directive> {
        match self {
            Self::View(v) => v.visibility(ratio),
            Self::Hover(_) | Self::Loop(_) => Vec::new(),
        }
    }

    /// The driver finished a cycle on its own.
    pub fn cycle_complete(&mut self) -> Vec<Directive> {
        match self {
            Self::Hover(h) => h.cycle_complete(),
            // The revealed text stays up; the latch keeps it from re-running.
            Self::View(_) => Vec::new(),
            Self::Loop(l) => l.cycle_complete(),
        }
    }

    /// A delayed transition came due.
    pub fn loop_step(&mut self, step: LoopStep) -> Vec<Directive> {
        match self {
            Self::Loop(l) => l.step(step),
            Self::Hover(_) | Self::View(_) => Vec::new(),
        }
    }
}
