//! Spin controller
//!
//! Turns trigger calls and frame timestamps into wheel rotation, and
//! reports the landed segment when a run completes.

pub mod controller;
pub mod run;

pub use controller::{Outcome, SpinController, SpinError, WheelState};
pub use run::{RunKind, SpinRun};
