//! Capability traits
//!
//! These traits define the interface between the spin logic and the
//! surface that embeds it: frame timing, drawing, result readout, and the
//! segment text field. A missing collaborator is a no-op implementation,
//! never an `Option`.

pub mod frame;
pub mod input;
pub mod outcome;
pub mod render;

pub use frame::{AnimationHandle, FrameScheduler};
pub use input::{InputSource, NoInput};
pub use outcome::{NoopOutcome, OutcomeSink};
pub use render::{NoopRender, RenderError, RenderSink, WheelView};
