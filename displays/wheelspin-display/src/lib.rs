//! Text-mode display support for the wheelspin core
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (OLED, LCD, terminal)
//! - `Screen` character buffer with dirty tracking
//! - `WheelRenderer`, a render and outcome sink that lays the wheel out as
//!   a pointer window plus status and result lines
//!
//! # Layout
//!
//! ```text
//! row 0  == WHEEL (5) ==
//! row 2    banana
//! row 3  > cherry          (inverted)
//! row 4    date
//! row 6  Ready
//! row 7  Result: <> cherry
//! ```

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use renderer::{format_result, window_indices, WheelRenderer, WINDOW_ROWS};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
