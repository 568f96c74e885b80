//! Data-structure engine for the visualizer
//!
//! Plain, synchronous containers: they never notify anyone and never sleep.
//! Lookups against empty or missing state return `None` or `false` rather
//! than panicking; all staging and animation lives in `dsv-sequencer`.

pub mod graph;
pub mod hash_table;
pub mod queue;
pub mod stack;
pub mod tree;

// Re-export commonly used types
pub use graph::{Graph, VertexId, Weight, DEFAULT_WEIGHT};
pub use hash_table::{Bucket, HashTable, DEFAULT_CAPACITY};
pub use queue::Queue;
pub use stack::Stack;
pub use tree::{BinarySearchTree, Node, TraversalOrder};
