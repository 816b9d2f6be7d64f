//! Render sink
//!
//! The sink only reads the wheel; it can never move it. Draw failures are
//! reported back but do not stop the animation.

use core::fmt;

use crate::segments::SegmentRegistry;
use crate::spin::Outcome;

/// Errors a render sink can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Drawing surface not available (not laid out, context lost)
    SurfaceUnavailable,
    /// Backend rejected a draw command
    Backend,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceUnavailable => f.write_str("drawing surface unavailable"),
            RenderError::Backend => f.write_str("draw command failed"),
        }
    }
}

/// Read-only snapshot handed to the render sink
#[derive(Debug, Clone, Copy)]
pub struct WheelView<'a> {
    /// Accumulated rotation (radians)
    pub rotation: f64,
    /// Segments in wheel order (never empty)
    pub segments: &'a SegmentRegistry,
    /// Whether a run is in flight
    pub spinning: bool,
    /// Segment currently under the pointer
    pub pointer_index: usize,
    /// Last landed result, cleared when a new spin starts or input changes
    pub outcome: Option<&'a Outcome>,
}

/// Trait for wheel renderers
pub trait RenderSink {
    /// Draw the wheel
    fn draw(&mut self, view: &WheelView<'_>) -> Result<(), RenderError>;
}

/// Render sink for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRender;

impl RenderSink for NoopRender {
    fn draw(&mut self, _view: &WheelView<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn draw(&mut self, view: &WheelView<'_>) -> Result<(), RenderError> {
        (**self).draw(view)
    }
}
