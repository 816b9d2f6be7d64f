//! Spin controller
//!
//! Owns the wheel state and the current run. Callers drive it with
//! `start`, `tick`, and `interrupt`; the controller never schedules frames
//! itself, it only reports whether it still needs them.

use core::fmt;

use super::run::{RunKind, SpinRun};
use crate::config::{SettlePolicy, SpinPolicy, WheelConfig};
use crate::geometry::{landed_index, normalize, Easing};
use crate::segments::{is_zero_label, Label, SegmentRegistry};
use crate::state::{Event, State};

/// Errors from controller calls with invalid arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpinError {
    /// Requested target index is not on the wheel
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinError::IndexOutOfRange { index, len } => {
                write!(f, "segment index {} out of range for {} segments", index, len)
            }
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outcome {
    /// Segment under the pointer
    pub index: usize,
    /// Label of that segment
    pub label: Label,
    /// Kind of run that landed
    pub kind: RunKind,
}

impl Outcome {
    /// Check if the landed label is zero-valued ("0" or "00")
    pub fn is_zero(&self) -> bool {
        is_zero_label(&self.label)
    }
}

/// Rotation and segments of the wheel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelState {
    /// Accumulated rotation (radians); only bounded between runs
    pub rotation: f64,
    /// Current segments
    pub segments: SegmentRegistry,
}

impl WheelState {
    /// Segment index currently under the pointer
    pub fn landed_index(&self) -> usize {
        landed_index(self.rotation, self.segments.len())
    }
}

/// Spin state machine and run owner
#[derive(Debug, Clone)]
pub struct SpinController {
    /// Lifecycle state
    state: State,
    /// Rotation and segments
    wheel: WheelState,
    /// Active run (Spinning only)
    run: Option<SpinRun>,
    /// Curve applied to every run
    easing: Easing,
    /// Full spin duration policy
    spin: SpinPolicy,
    /// Settle run policy
    settle: SettlePolicy,
}

impl SpinController {
    /// Create a controller at rest with segments parsed from the default input
    pub fn new(config: &WheelConfig) -> Self {
        let (segments, _) = SegmentRegistry::parse(&config.default_input);
        Self::with_segments(segments, config)
    }

    /// Create a controller at rest with the given segments
    pub fn with_segments(segments: SegmentRegistry, config: &WheelConfig) -> Self {
        Self {
            state: State::Idle,
            wheel: WheelState {
                rotation: 0.0,
                segments,
            },
            run: None,
            easing: config.easing,
            spin: config.spin,
            settle: config.settle,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Check if a run is in flight
    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    /// Current rotation (radians)
    pub fn rotation(&self) -> f64 {
        self.wheel.rotation
    }

    /// Current segments
    pub fn segments(&self) -> &SegmentRegistry {
        &self.wheel.segments
    }

    /// Wheel state snapshot
    pub fn wheel(&self) -> &WheelState {
        &self.wheel
    }

    /// Active run, if spinning
    pub fn run(&self) -> Option<&SpinRun> {
        self.run.as_ref()
    }

    /// Segment index currently under the pointer
    pub fn landed_index(&self) -> usize {
        self.wheel.landed_index()
    }

    /// Full spin policy
    pub fn spin_policy(&self) -> &SpinPolicy {
        &self.spin
    }

    /// Settle policy
    pub fn settle_policy(&self) -> &SettlePolicy {
        &self.settle
    }

    /// Replace the segments
    ///
    /// Returns `false` without touching anything unless idle.
    pub fn set_segments(&mut self, segments: SegmentRegistry) -> bool {
        if !self.state.segments_editable() {
            return false;
        }
        self.wheel.segments = segments;
        true
    }

    /// Start a full spin toward `index` with `extra_turns` whole turns
    ///
    /// Returns `Ok(false)` if a run is already in flight; the running spin
    /// is left untouched. The stored rotation is folded into `[0, 2π)`
    /// first, which leaves the segment under the pointer unchanged.
    pub fn start(&mut self, index: usize, extra_turns: u32, now_ms: u32) -> Result<bool, SpinError> {
        if !self.state.can_start() {
            debug!("start ignored in state {}", self.state);
            return Ok(false);
        }

        let n = self.wheel.segments.len();
        if index >= n {
            return Err(SpinError::IndexOutOfRange { index, len: n });
        }

        self.wheel.rotation = normalize(self.wheel.rotation);
        let duration_ms = self.spin.duration_ms(extra_turns);
        let run = SpinRun::plan(
            RunKind::Spin,
            index,
            extra_turns,
            self.wheel.rotation,
            n,
            now_ms,
            duration_ms,
            self.easing,
        );

        info!(
            "spin start: target {} turns {} duration {} ms",
            index,
            extra_turns,
            duration_ms
        );

        self.run = Some(run);
        self.transition(Event::Start);
        Ok(true)
    }

    /// Advance the active run to `now_ms`
    ///
    /// Returns the outcome when the run completes; the controller is idle
    /// again by the time this returns. Returns `None` while the run is still
    /// going and when there is no run.
    pub fn tick(&mut self, now_ms: u32) -> Option<Outcome> {
        if self.state != State::Spinning {
            return None;
        }
        let run = self.run?;

        // rotation_at() pins the final frame to the exact target
        self.wheel.rotation = run.rotation_at(now_ms);
        if !run.is_finished_at(now_ms) {
            return None;
        }

        self.run = None;
        self.transition(Event::RunFinished);
        let outcome = self.outcome(run.kind);
        self.transition(Event::OutcomeReported);

        info!("landed on {} ({})", outcome.index, outcome.label.as_str());
        Some(outcome)
    }

    /// Replace the running spin with a short settle run
    ///
    /// The new target is `offset` segments past the one currently under the
    /// pointer. The settle run starts from the rotation reached at `now_ms`
    /// and uses the settle duration. Returns `false` unless spinning.
    pub fn interrupt(&mut self, extra_turns: u32, offset: usize, now_ms: u32) -> bool {
        if self.state != State::Spinning {
            return false;
        }
        let Some(old) = self.run.take() else {
            return false;
        };
        self.transition(Event::Interrupt);

        self.wheel.rotation = old.rotation_at(now_ms);
        let n = self.wheel.segments.len();
        let current = self.wheel.landed_index();
        let target = (current + offset % n) % n;

        let run = SpinRun::plan(
            RunKind::Settle,
            target,
            extra_turns,
            self.wheel.rotation,
            n,
            now_ms,
            self.settle.duration_ms,
            self.easing,
        );

        info!(
            "interrupt: {} -> {} over {} ms",
            current,
            target,
            run.duration_ms
        );

        self.run = Some(run);
        self.transition(Event::Retargeted);
        true
    }

    /// Drop any run and return to idle at the current rotation
    pub fn reset(&mut self) {
        self.run = None;
        self.transition(Event::Reset);
    }

    /// Outcome for the segment currently under the pointer
    fn outcome(&self, kind: RunKind) -> Outcome {
        let index = self.wheel.landed_index();
        let label = self
            .wheel
            .segments
            .get(index)
            .cloned()
            .unwrap_or_default();
        Outcome { index, label, kind }
    }

    fn transition(&mut self, event: Event) {
        let next = self.state.transition(event);
        debug!("state {} --{}--> {}", self.state, event, next);
        self.state = next;
    }
}
