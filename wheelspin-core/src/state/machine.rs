//! State machine definition
//!
//! Whether the wheel may be started, retargeted, or edited is a function of
//! the current state alone.

use super::events::Event;

/// Spin states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// At rest; segments may be edited and a spin started
    #[default]
    Idle,
    /// A run is advancing on every frame
    Spinning,
    /// The running spin is being replaced by a settle run
    Interrupting,
    /// The run reached its target; outcome not yet reported
    Landed,
}

impl State {
    /// Check if the wheel is moving (or about to move again)
    pub fn is_spinning(&self) -> bool {
        matches!(self, State::Spinning | State::Interrupting)
    }

    /// Check if a new spin may start
    pub fn can_start(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Check if segment edits are allowed
    pub fn segments_editable(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Process an event and return the next state
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, Start) => Spinning,

            (Spinning, Interrupt) => Interrupting,
            (Spinning, RunFinished) => Landed,

            (Interrupting, Retargeted) => Spinning,

            (Landed, OutcomeReported) => Idle,

            // Reset from anywhere
            (_, Reset) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
