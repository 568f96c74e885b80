//! Per-family hooks the sequencer drives

use std::fmt::Debug;

use crate::error::OperationError;
use crate::phase::{PhasePlan, StructureFamily};

/// A structure the [`crate::Sequencer`] can animate.
///
/// `plan` describes the phases from the pre-mutation state and must not
/// change anything; `apply` is the only place the structure is mutated.
pub trait Animated: Send + Sync + 'static {
    /// Operation with its operand, e.g. "insert 42"
    type Op: Clone + Debug + Send + Sync + 'static;

    /// What the mutation hands back (popped value, success flag, ...)
    type Output: Clone + Debug + Send + Sync + 'static;

    const FAMILY: StructureFamily;

    /// Caller-side precondition check, run before `invoke`
    fn check(&self, op: &Self::Op) -> Result<(), OperationError>;

    fn plan(&self, op: &Self::Op) -> PhasePlan;

    /// Perform the mutation. Only called for plans with a mutate step.
    fn apply(&mut self, op: &Self::Op) -> Self::Output;
}
