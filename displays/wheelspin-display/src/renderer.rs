//! Wheel renderer
//!
//! Lays the wheel out on a character screen. The rotation itself is not
//! drawn; the pointer window shows the segment under the pointer with its
//! neighbours, which is what moves on a text display.

use core::fmt::Write;

use wheelspin_core::traits::{OutcomeSink, RenderError, RenderSink, WheelView};
use wheelspin_core::Outcome;

use crate::backend::DisplayBackend;
use crate::screen::{Line, Screen};

/// Rows in the pointer window
pub const WINDOW_ROWS: usize = 3;

/// Marker for zero-valued results
pub const ZERO_MARKER: &str = "[0]";

/// Badges for other results, alternating by segment index
pub const BADGES: [&str; 2] = ["<>", "[]"];

const TITLE_ROW: usize = 0;
const WINDOW_TOP: usize = 2;
const POINTER_ROW: usize = WINDOW_TOP + WINDOW_ROWS / 2;
const STATUS_ROW: usize = 6;
const RESULT_ROW: usize = 7;

/// Segment indices shown in the pointer window, top to bottom
///
/// The pointer segment sits in the middle row; neighbours wrap around the
/// wheel.
pub fn window_indices(pointer: usize, n: usize) -> [usize; WINDOW_ROWS] {
    let n = n.max(1);
    let half = WINDOW_ROWS / 2;
    core::array::from_fn(|i| (pointer % n + n * WINDOW_ROWS + i - half) % n)
}

/// Text of the result line
///
/// No result is shown while a run is in flight; the status line carries
/// the motion.
pub fn format_result(outcome: Option<&Outcome>, spinning: bool) -> Line {
    let mut line = Line::new();
    match outcome.filter(|_| !spinning) {
        Some(outcome) => {
            let marker = if outcome.is_zero() {
                ZERO_MARKER
            } else {
                BADGES[outcome.index % 2]
            };
            let _ = write!(line, "Result: {} {}", marker, outcome.label.as_str());
        }
        None => {
            let _ = line.push_str("Result: -");
        }
    }
    line
}

/// Render and outcome sink over a character display
pub struct WheelRenderer<B> {
    backend: B,
    screen: Screen,
    /// Most recent outcome handed to [`OutcomeSink::report`]
    last_reported: Option<Outcome>,
    reports: u32,
}

impl<B: DisplayBackend> WheelRenderer<B> {
    /// Create a renderer drawing to `backend`
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            screen: Screen::new(),
            last_reported: None,
            reports: 0,
        }
    }

    /// Get the screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the backend mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Most recently reported outcome
    pub fn last_reported(&self) -> Option<&Outcome> {
        self.last_reported.as_ref()
    }

    /// Number of outcomes reported
    pub fn reports(&self) -> u32 {
        self.reports
    }

    fn compose(&mut self, view: &WheelView<'_>) {
        let mut title = Line::new();
        let _ = write!(title, "== WHEEL ({}) ==", view.segments.len());
        self.screen.set_line(TITLE_ROW, &title);

        let indices = window_indices(view.pointer_index, view.segments.len());
        for (i, index) in indices.iter().enumerate() {
            let row = WINDOW_TOP + i;
            let prefix = if row == POINTER_ROW { "> " } else { "  " };
            let label = view.segments.get(*index).map(|l| l.as_str()).unwrap_or("");

            let mut line = Line::new();
            let _ = write!(line, "{}{}", prefix, label);
            self.screen.set_line(row, &line);
        }
        self.screen.set_highlight(Some(POINTER_ROW as u8));

        let status = if view.spinning { "Spinning..." } else { "Ready" };
        self.screen.set_line(STATUS_ROW, status);
        self.screen
            .set_line(RESULT_ROW, &format_result(view.outcome, view.spinning));
    }
}

impl<B: DisplayBackend> RenderSink for WheelRenderer<B> {
    fn draw(&mut self, view: &WheelView<'_>) -> Result<(), RenderError> {
        if !self.backend.is_ready() {
            return Err(RenderError::SurfaceUnavailable);
        }
        self.compose(view);
        self.screen.render_to(&mut self.backend)?;
        Ok(())
    }
}

impl<B: DisplayBackend> OutcomeSink for WheelRenderer<B> {
    fn report(&mut self, outcome: &Outcome) {
        self.last_reported = Some(outcome.clone());
        self.reports = self.reports.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DisplayError;
    use crate::screen::{LINE_BYTES, SCREEN_COLS, SCREEN_ROWS};
    use heapless::String;
    use wheelspin_core::{Label, RunKind, SegmentRegistry};

    /// Backend that keeps what was drawn
    struct MockDisplay {
        rows: [String<LINE_BYTES>; SCREEN_ROWS],
        inverted: Option<u8>,
        flushes: u32,
        ready: bool,
        fail_draw: bool,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                rows: core::array::from_fn(|_| String::new()),
                inverted: None,
                flushes: 0,
                ready: true,
                fail_draw: false,
            }
        }

        fn row(&self, row: usize) -> &str {
            self.rows[row].as_str()
        }
    }

    impl DisplayBackend for MockDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            for row in &mut self.rows {
                row.clear();
            }
            self.inverted = None;
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            if self.fail_draw {
                return Err(DisplayError::Communication);
            }
            let slot = self
                .rows
                .get_mut(row as usize)
                .ok_or(DisplayError::InvalidCoordinates)?;
            slot.clear();
            let _ = slot.push_str(text);
            Ok(())
        }

        fn invert_region(&mut self, row: u8, _start: u8, _end: u8) -> Result<(), DisplayError> {
            self.inverted = Some(row);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    fn outcome(index: usize, label: &str) -> Outcome {
        Outcome {
            index,
            label: Label::try_from(label).unwrap(),
            kind: RunKind::Spin,
        }
    }

    fn view<'a>(
        segments: &'a SegmentRegistry,
        pointer_index: usize,
        spinning: bool,
        outcome: Option<&'a Outcome>,
    ) -> WheelView<'a> {
        WheelView {
            rotation: 0.0,
            segments,
            spinning,
            pointer_index,
            outcome,
        }
    }

    #[test]
    fn test_window_indices_wrap() {
        assert_eq!(window_indices(0, 5), [4, 0, 1]);
        assert_eq!(window_indices(2, 5), [1, 2, 3]);
        assert_eq!(window_indices(4, 5), [3, 4, 0]);
        assert_eq!(window_indices(0, 1), [0, 0, 0]);
        assert_eq!(window_indices(1, 2), [0, 1, 0]);
    }

    #[test]
    fn test_format_result_markers() {
        assert_eq!(format_result(Some(&outcome(0, "0")), false).as_str(), "Result: [0] 0");
        assert_eq!(format_result(Some(&outcome(3, "00")), false).as_str(), "Result: [0] 00");
        assert_eq!(format_result(Some(&outcome(2, "7")), false).as_str(), "Result: <> 7");
        assert_eq!(format_result(Some(&outcome(1, "7")), false).as_str(), "Result: [] 7");
    }

    #[test]
    fn test_format_result_spinning_and_empty() {
        assert_eq!(format_result(Some(&outcome(1, "7")), true).as_str(), "Result: -");
        assert_eq!(format_result(None, false).as_str(), "Result: -");
    }

    #[test]
    fn test_draw_layout() {
        let (segments, _) = SegmentRegistry::parse("apple,banana,cherry,date,elder");
        let landed = outcome(2, "cherry");
        let mut renderer = WheelRenderer::new(MockDisplay::new());

        renderer
            .draw(&view(&segments, 2, false, Some(&landed)))
            .unwrap();

        let display = renderer.backend();
        assert_eq!(display.row(0), "== WHEEL (5) ==");
        assert_eq!(display.row(2), "  banana");
        assert_eq!(display.row(3), "> cherry");
        assert_eq!(display.row(4), "  date");
        assert_eq!(display.row(6), "Ready");
        assert_eq!(display.row(7), "Result: <> cherry");
        assert_eq!(display.inverted, Some(POINTER_ROW as u8));
        assert_eq!(display.flushes, 1);
    }

    #[test]
    fn test_draw_skips_unchanged_screen() {
        let (segments, _) = SegmentRegistry::parse("a,b,c");
        let mut renderer = WheelRenderer::new(MockDisplay::new());

        renderer.draw(&view(&segments, 0, true, None)).unwrap();
        renderer.draw(&view(&segments, 0, true, None)).unwrap();
        assert_eq!(renderer.backend().flushes, 1);

        renderer.draw(&view(&segments, 1, true, None)).unwrap();
        assert_eq!(renderer.backend().flushes, 2);
        assert_eq!(renderer.backend().row(3), "> b");
        assert_eq!(renderer.backend().row(6), "Spinning...");
        assert_eq!(renderer.backend().row(7), "Result: -");
    }

    #[test]
    fn test_draw_not_ready() {
        let (segments, _) = SegmentRegistry::parse("a,b");
        let mut display = MockDisplay::new();
        display.ready = false;
        let mut renderer = WheelRenderer::new(display);

        let result = renderer.draw(&view(&segments, 0, false, None));
        assert_eq!(result, Err(RenderError::SurfaceUnavailable));
    }

    #[test]
    fn test_draw_failure_retried() {
        let (segments, _) = SegmentRegistry::parse("a,b");
        let mut display = MockDisplay::new();
        display.fail_draw = true;
        let mut renderer = WheelRenderer::new(display);

        let result = renderer.draw(&view(&segments, 0, false, None));
        assert_eq!(result, Err(RenderError::Backend));
        assert!(renderer.screen().is_dirty());

        renderer.backend_mut().fail_draw = false;
        renderer.draw(&view(&segments, 0, false, None)).unwrap();
        assert_eq!(renderer.backend().row(3), "> a");
        assert!(!renderer.screen().is_dirty());
    }

    #[test]
    fn test_report_outcome() {
        let mut renderer = WheelRenderer::new(MockDisplay::new());
        renderer.report(&outcome(1, "1"));
        renderer.report(&outcome(0, "0"));

        assert_eq!(renderer.reports(), 2);
        assert_eq!(renderer.last_reported(), Some(&outcome(0, "0")));
    }
}
