//! Board-agnostic core logic for a segmented spinning wheel
//!
//! This crate contains everything that decides where the wheel points and
//! what it lands on. Drawing, input widgets and frame timing are supplied by
//! the embedding surface through small capability traits.
//!
//! - Angle/index geometry and easing curves
//! - State machine for spin execution
//! - Spin controller (start, tick, interrupt, land)
//! - Segment registry and input parsing
//! - Capability traits (frame scheduler, render, outcome, input)
//! - Configuration type definitions
//! - Session wiring of the above

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod geometry;
pub mod segments;
pub mod session;
pub mod spin;
pub mod state;
pub mod traits;

pub use segments::{Label, ParseReport, SegmentRegistry};
pub use session::{SessionError, WheelSession};
pub use spin::{Outcome, RunKind, SpinController, SpinRun};
