//! Spin runs
//!
//! A run is one animated transition from a start rotation to a target
//! rotation over a fixed duration. It is resumable: the rotation for any
//! timestamp is recomputed from absolute elapsed time, so skipped or
//! irregular frames do not accumulate error.

use crate::geometry::{target_rotation_for, Easing};

/// Why a run was created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunKind {
    /// Long spin started by the spin trigger
    Spin,
    /// Short run that replaced an interrupted spin
    Settle,
}

/// One animated run toward a target segment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinRun {
    /// Why this run exists
    pub kind: RunKind,
    /// Segment the run lands on
    pub target_index: usize,
    /// Rotation when the run started (radians)
    pub start_rotation: f64,
    /// Rotation when the run ends (radians), always above `start_rotation`
    pub target_rotation: f64,
    /// Timestamp of the run start (ms)
    pub start_ms: u32,
    /// Run length (ms, at least 1)
    pub duration_ms: u32,
    /// Progress reparametrization
    pub easing: Easing,
}

impl SpinRun {
    /// Plan a run landing on `target_index` of an `n`-segment wheel
    #[allow(clippy::too_many_arguments)]
    pub fn plan(
        kind: RunKind,
        target_index: usize,
        extra_turns: u32,
        current_rotation: f64,
        n: usize,
        start_ms: u32,
        duration_ms: u32,
        easing: Easing,
    ) -> Self {
        let n = n.max(1);
        let target_index = target_index % n;
        let target_rotation = target_rotation_for(target_index, extra_turns, current_rotation, n);
        Self {
            kind,
            target_index,
            start_rotation: current_rotation,
            target_rotation,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Total rotation covered by the run (radians, positive)
    pub fn delta(&self) -> f64 {
        self.target_rotation - self.start_rotation
    }

    /// Timestamp at which the run completes (ms, wraps with the clock)
    pub fn end_ms(&self) -> u32 {
        self.start_ms.wrapping_add(self.duration_ms)
    }

    /// Milliseconds since the start on a wrapping `u32` clock
    ///
    /// Timestamps up to half the clock range behind the start count as
    /// before it and yield 0.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        let elapsed = now_ms.wrapping_sub(self.start_ms);
        if elapsed > i32::MAX as u32 {
            0
        } else {
            elapsed
        }
    }

    /// Normalized progress at `now_ms`, clamped to `[0, 1]`
    ///
    /// A timestamp before the start counts as no progress.
    pub fn progress(&self, now_ms: u32) -> f64 {
        let elapsed = self.elapsed_ms(now_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Check if the run is complete at `now_ms`
    pub fn is_finished_at(&self, now_ms: u32) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Rotation at `now_ms`
    ///
    /// Exactly `target_rotation` once the run is complete.
    pub fn rotation_at(&self, now_ms: u32) -> f64 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.target_rotation;
        }
        self.start_rotation + self.delta() * self.easing.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{landed_index, TAU};

    fn cubic_run() -> SpinRun {
        SpinRun::plan(RunKind::Spin, 1, 2, 0.0, 4, 1000, 2000, Easing::EaseOutCubic)
    }

    #[test]
    fn test_plan_targets_forward() {
        let run = cubic_run();
        assert!(run.target_rotation > run.start_rotation);
        assert!(run.delta() > TAU);
        assert_eq!(landed_index(run.target_rotation, 4), 1);
        assert_eq!(run.end_ms(), 3000);
    }

    #[test]
    fn test_plan_wraps_index() {
        let run = SpinRun::plan(RunKind::Settle, 6, 0, 0.0, 4, 0, 100, Easing::Linear);
        assert_eq!(run.target_index, 2);
        assert_eq!(landed_index(run.target_rotation, 4), 2);
    }

    #[test]
    fn test_zero_duration_is_bumped() {
        let run = SpinRun::plan(RunKind::Spin, 0, 0, 0.0, 2, 0, 0, Easing::Linear);
        assert_eq!(run.duration_ms, 1);
        assert!(run.is_finished_at(1));
    }

    #[test]
    fn test_progress_clamps() {
        let run = cubic_run();
        assert_eq!(run.progress(0), 0.0);
        assert_eq!(run.progress(1000), 0.0);
        assert_eq!(run.progress(2000), 0.5);
        assert_eq!(run.progress(3000), 1.0);
        assert_eq!(run.progress(1_000_000), 1.0);
    }

    #[test]
    fn test_run_across_clock_wrap() {
        let start = u32::MAX - 1000;
        let run = SpinRun::plan(RunKind::Spin, 2, 6, 0.0, 5, start, 11_000, Easing::EaseOutCubic);
        assert_eq!(run.end_ms(), 11_000 - 1001);

        let mut prev = run.start_rotation;
        let mut now = start;
        while !run.is_finished_at(now) {
            now = now.wrapping_add(16);
            let rotation = run.rotation_at(now);
            assert!(rotation >= prev);
            prev = rotation;
            assert!(run.elapsed_ms(now) <= 11_016);
        }
        assert_eq!(prev, run.target_rotation);
        assert!(now < start);
        // Slightly behind the start is still before it, not far past the end
        assert_eq!(run.progress(start - 5), 0.0);
    }

    #[test]
    fn test_rotation_exact_at_end() {
        let run = cubic_run();
        assert_eq!(run.rotation_at(3000), run.target_rotation);
        assert_eq!(run.rotation_at(9999), run.target_rotation);
        assert_eq!(run.rotation_at(1000), run.start_rotation);
    }

    #[test]
    fn test_rotation_decelerates() {
        let run = cubic_run();
        let first_half = run.rotation_at(2000) - run.start_rotation;
        let second_half = run.target_rotation - run.rotation_at(2000);
        assert!(first_half > second_half);
    }

    #[test]
    fn test_rotation_never_decreases() {
        let run = cubic_run();
        let mut prev = run.rotation_at(0);
        for now in (0..3500).step_by(7) {
            let rotation = run.rotation_at(now);
            assert!(rotation >= prev);
            prev = rotation;
        }
    }
}
