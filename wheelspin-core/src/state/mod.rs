//! State machine for spin execution
//!
//! Defines the authoritative lifecycle of a spin run.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
