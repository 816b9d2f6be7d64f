//! Wheel geometry
//!
//! Pure conversions between rotation angles and segment indices, plus the
//! easing curves that turn elapsed time into deceleration.

pub mod angle;
pub mod easing;

pub use angle::{landed_index, normalize, segment_span, target_rotation_for, TAU};
pub use easing::Easing;
