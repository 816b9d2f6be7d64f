//! Wheel session
//!
//! The session is the single owner of the spin controller and its
//! collaborators. It is the only place that talks to the frame scheduler,
//! which is how the one-live-frame rule is kept:
//! - a frame is requested only when no handle is held
//! - a held handle is cancelled before anything else is scheduled
//! - a frame that fires with a stale handle is ignored

use core::fmt;

use rand::Rng;

use crate::config::{ConfigError, WheelConfig};
use crate::segments::{ParseReport, SegmentRegistry};
use crate::spin::{Outcome, SpinController, SpinError};
use crate::state::State;
use crate::traits::{
    AnimationHandle, FrameScheduler, InputSource, OutcomeSink, RenderSink, WheelView,
};

/// Session errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Segments cannot change while the wheel is moving
    Busy,
    /// Configuration rejected
    Config(ConfigError),
    /// Controller rejected the request
    Spin(SpinError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Busy => f.write_str("wheel is spinning"),
            SessionError::Config(err) => write!(f, "configuration error: {}", err),
            SessionError::Spin(err) => write!(f, "spin error: {}", err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        SessionError::Config(err)
    }
}

impl From<SpinError> for SessionError {
    fn from(err: SpinError) -> Self {
        SessionError::Spin(err)
    }
}

/// One wheel and everything attached to it
///
/// - `F`: frame scheduler
/// - `R`: render sink
/// - `O`: outcome sink
/// - `I`: segment input source
/// - `G`: random source for targets, turns and settle offsets
pub struct WheelSession<F, R, O, I, G> {
    controller: SpinController,
    config: WheelConfig,
    frames: F,
    render: R,
    outcomes: O,
    input: I,
    rng: G,
    /// The only live frame callback, if any
    handle: Option<AnimationHandle>,
    /// Result shown in the readout until the next spin or input edit
    last_outcome: Option<Outcome>,
    render_failures: u32,
}

impl<F, R, O, I, G> WheelSession<F, R, O, I, G>
where
    F: FrameScheduler,
    R: RenderSink,
    O: OutcomeSink,
    I: InputSource,
    G: Rng,
{
    /// Create a session at rest and draw the initial wheel
    ///
    /// Segments come from the input source, or from the configured default
    /// input when the source has no text.
    pub fn new(
        config: WheelConfig,
        frames: F,
        render: R,
        outcomes: O,
        input: I,
        rng: G,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let (segments, report) =
            SegmentRegistry::parse(input.text().unwrap_or(config.default_input.as_str()));
        log_report(&report);
        let controller = SpinController::with_segments(segments, &config);

        info!("wheel ready with {} segments", controller.segments().len());

        let mut session = Self {
            controller,
            config,
            frames,
            render,
            outcomes,
            input,
            rng,
            handle: None,
            last_outcome: None,
            render_failures: 0,
        };
        session.redraw();
        Ok(session)
    }

    /// Spin controller (read-only)
    pub fn controller(&self) -> &SpinController {
        &self.controller
    }

    /// Current controller state
    pub fn state(&self) -> State {
        self.controller.state()
    }

    /// Check if the wheel is moving
    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    /// Current rotation (radians)
    pub fn rotation(&self) -> f64 {
        self.controller.rotation()
    }

    /// Current segments
    pub fn segments(&self) -> &SegmentRegistry {
        self.controller.segments()
    }

    /// Result of the last completed run, until the next spin or edit
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Check if a frame callback is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of draw calls that failed so far
    pub fn render_failures(&self) -> u32 {
        self.render_failures
    }

    /// Frame scheduler
    pub fn frames(&self) -> &F {
        &self.frames
    }

    /// Render sink
    pub fn render(&self) -> &R {
        &self.render
    }

    /// Outcome sink
    pub fn outcomes(&self) -> &O {
        &self.outcomes
    }

    /// Input source, for editing its text
    ///
    /// Edits take effect on the next [`reload_input`](Self::reload_input) or
    /// [`spin`](Self::spin).
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Replace the segments from raw text
    ///
    /// Refused with [`SessionError::Busy`] while the wheel is moving.
    pub fn set_input(&mut self, raw: &str) -> Result<ParseReport, SessionError> {
        if !self.controller.state().segments_editable() {
            return Err(SessionError::Busy);
        }
        let (segments, report) = SegmentRegistry::parse(raw);
        self.apply_segments(segments, report)
    }

    /// Re-read the segments from the input source
    ///
    /// Falls back to the configured default input when the source has no
    /// text. Refused with [`SessionError::Busy`] while the wheel is moving.
    pub fn reload_input(&mut self) -> Result<ParseReport, SessionError> {
        if !self.controller.state().segments_editable() {
            return Err(SessionError::Busy);
        }
        let (segments, report) = SegmentRegistry::parse(
            self.input
                .text()
                .unwrap_or(self.config.default_input.as_str()),
        );
        self.apply_segments(segments, report)
    }

    /// Spin trigger: random target and turn count
    ///
    /// Re-reads the input first. Returns `Ok(false)` while a run is in
    /// flight; repeated triggers are swallowed.
    pub fn spin(&mut self, now_ms: u32) -> Result<bool, SessionError> {
        if !self.controller.state().can_start() {
            debug!("spin trigger ignored while busy");
            return Ok(false);
        }
        self.reload_input()?;

        let n = self.controller.segments().len();
        let policy = *self.controller.spin_policy();
        let index = self.rng.random_range(0..n);
        let turns = self.rng.random_range(policy.min_turns..=policy.max_turns);
        self.spin_to(index, turns, now_ms)
    }

    /// Spin toward a chosen segment with a chosen number of extra turns
    ///
    /// Uses the current segments as they are. Returns `Ok(false)` while a
    /// run is in flight.
    pub fn spin_to(&mut self, index: usize, turns: u32, now_ms: u32) -> Result<bool, SessionError> {
        if !self.controller.start(index, turns, now_ms)? {
            return Ok(false);
        }
        self.last_outcome = None;
        self.schedule_frame();
        self.redraw();
        Ok(true)
    }

    /// Stop trigger: settle on a nearby segment quickly
    ///
    /// Returns `false` when the wheel is not spinning.
    pub fn stop(&mut self, now_ms: u32) -> bool {
        if self.controller.state() != State::Spinning {
            return false;
        }
        let settle = *self.controller.settle_policy();
        let offset = self.rng.random_range(settle.min_offset..=settle.max_offset);
        self.interrupt(settle.extra_turns, offset as usize, now_ms)
    }

    /// Retarget the running spin `offset` segments past the pointer
    ///
    /// Returns `false` when the wheel is not spinning.
    pub fn interrupt(&mut self, extra_turns: u32, offset: usize, now_ms: u32) -> bool {
        if self.controller.state() != State::Spinning {
            return false;
        }

        // The old loop must be dead before the settle run exists
        self.cancel_pending();
        let retargeted = self.controller.interrupt(extra_turns, offset, now_ms);
        if self.controller.is_spinning() {
            self.schedule_frame();
        }
        self.redraw();
        retargeted
    }

    /// Frame callback
    ///
    /// Advances the run to `now_ms`, draws, and either schedules the next
    /// frame or reports the outcome. Frames with a handle other than the
    /// live one are ignored.
    pub fn on_frame(&mut self, handle: AnimationHandle, now_ms: u32) -> Option<Outcome> {
        if self.handle != Some(handle) {
            debug!("stale frame {} ignored", handle.id());
            return None;
        }
        self.handle = None;

        let outcome = self.controller.tick(now_ms);
        if outcome.is_none() && self.controller.is_spinning() {
            self.schedule_frame();
        }
        if let Some(outcome) = &outcome {
            self.last_outcome = Some(outcome.clone());
        }

        self.redraw();

        if let Some(outcome) = &outcome {
            self.outcomes.report(outcome);
        }
        outcome
    }

    /// Stop immediately where the wheel is, without landing
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.controller.reset();
        self.redraw();
    }

    /// Draw the current view
    ///
    /// Failures are counted and logged; the run carries on regardless.
    pub fn redraw(&mut self) -> bool {
        let view = WheelView {
            rotation: self.controller.rotation(),
            segments: self.controller.segments(),
            spinning: self.controller.is_spinning(),
            pointer_index: self.controller.landed_index(),
            outcome: self.last_outcome.as_ref(),
        };

        match self.render.draw(&view) {
            Ok(()) => true,
            Err(err) => {
                self.render_failures = self.render_failures.saturating_add(1);
                warn!("draw failed: {}", err);
                false
            }
        }
    }

    fn apply_segments(
        &mut self,
        segments: SegmentRegistry,
        report: ParseReport,
    ) -> Result<ParseReport, SessionError> {
        log_report(&report);
        if !self.controller.set_segments(segments) {
            return Err(SessionError::Busy);
        }
        self.last_outcome = None;
        self.redraw();
        Ok(report)
    }

    fn schedule_frame(&mut self) {
        // Never two loops: drop whatever is still held first
        self.cancel_pending();
        self.handle = Some(self.frames.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.frames.cancel_frame(handle);
        }
    }
}

fn log_report(report: &ParseReport) {
    if report.substituted_default {
        warn!("no segments in input; using defaults");
    }
    if report.truncated_labels > 0 {
        warn!("{} labels truncated", report.truncated_labels);
    }
    if report.dropped_items > 0 {
        warn!("{} segments over capacity dropped", report.dropped_items);
    }
}
