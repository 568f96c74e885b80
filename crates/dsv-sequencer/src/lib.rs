//! Operation animation sequencer
//!
//! Turns a single operation on a `dsv-core` structure ("insert 42") into
//! timed visual phases: Prepare, Mutate, Confirm, then back to Idle. The
//! structure is mutated exactly once, at the Prepare -> Mutate boundary.
//! Visual components subscribe to phase changes to drive highlights and the
//! reference code panel.

pub mod animated;
pub mod config;
pub mod engine;
pub mod error;
pub mod phase;
pub mod plans;
pub mod snippets;
pub mod subscriber;

// Re-export commonly used types
pub use animated::Animated;
pub use config::{SequencerConfig, MAX_SPEED, MIN_SPEED};
pub use engine::Sequencer;
pub use error::{ConfigError, OperationError};
pub use phase::{Highlight, Phase, PhaseContext, PhasePlan, PhaseStep, StructureFamily};
pub use plans::{GraphOp, HashTableOp, QueueOp, StackOp, TreeOp};
pub use snippets::SnippetId;
pub use subscriber::PhaseSubscriber;
