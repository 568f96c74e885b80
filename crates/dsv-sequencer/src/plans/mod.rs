//! Phase plans for each structure family

mod graph;
mod hash_table;
mod queue;
mod stack;
mod tree;

pub use graph::GraphOp;
pub use hash_table::HashTableOp;
pub use queue::QueueOp;
pub use stack::StackOp;
pub use tree::TreeOp;

/// Render values as "1, 2, 3"
fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
