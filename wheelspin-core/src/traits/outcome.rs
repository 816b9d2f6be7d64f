//! Outcome sink

use crate::spin::Outcome;

/// Trait for consumers of landed results
///
/// Called once per completed run, after the wheel has come to rest.
pub trait OutcomeSink {
    /// Receive the landed segment
    fn report(&mut self, outcome: &Outcome);
}

/// Outcome sink that discards results
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOutcome;

impl OutcomeSink for NoopOutcome {
    fn report(&mut self, _outcome: &Outcome) {}
}

impl<T: OutcomeSink + ?Sized> OutcomeSink for &mut T {
    fn report(&mut self, outcome: &Outcome) {
        (**self).report(outcome)
    }
}
