//! Phase subscriber trait

use crate::phase::PhaseContext;

/// Trait for visual components that follow a sequencer
pub trait PhaseSubscriber: Send + Sync {
    /// Called whenever the published phase state changes, including the
    /// return to [`crate::Phase::Idle`]
    fn on_phase_change(&self, context: &PhaseContext);

    /// Called once when an operation finishes its Confirm phase, right
    /// before the published state is cleared. Superseded or cancelled
    /// operations never reach this.
    fn on_phase_end(&self, context: &PhaseContext) {
        let _ = context;
    }
}
