//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Trigger events
    /// Spin trigger accepted
    Start,
    /// Stop trigger accepted
    Interrupt,
    /// External reset
    Reset,

    // Controller events
    /// Settle run built, replacing the interrupted one
    Retargeted,
    /// Run progress reached 1
    RunFinished,
    /// Landed outcome handed out
    OutcomeReported,
}
