//! Binary search tree animations

use dsv_core::{BinarySearchTree, TraversalOrder};

use super::join;
use crate::animated::Animated;
use crate::error::OperationError;
use crate::phase::{Highlight, PhasePlan, PhaseStep, StructureFamily};
use crate::snippets::SnippetId;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeOp {
    Insert(i64),
    Remove(i64),
    Find(i64),
    Contains(i64),
    Traverse(TraversalOrder),
}

impl TreeOp {
    pub fn name(&self) -> &'static str {
        match self {
            TreeOp::Insert(_) => "insert",
            TreeOp::Remove(_) => "remove",
            TreeOp::Find(_) => "find",
            TreeOp::Contains(_) => "contains",
            TreeOp::Traverse(order) => order.name(),
        }
    }
}

impl Animated for BinarySearchTree<i64> {
    type Op = TreeOp;
    /// Whether the tree changed
    type Output = bool;

    const FAMILY: StructureFamily = StructureFamily::Tree;

    fn check(&self, op: &TreeOp) -> Result<(), OperationError> {
        match op {
            TreeOp::Remove(value) if !self.contains(value) => {
                Err(OperationError::ValueNotFound(*value))
            }
            _ => Ok(()),
        }
    }

    fn plan(&self, op: &TreeOp) -> PhasePlan {
        let snippet = SnippetId::new(Self::FAMILY, op.name());

        match op {
            TreeOp::Insert(value) => plan_insert(self, snippet, *value),
            TreeOp::Remove(value) => plan_remove(self, snippet, *value),
            TreeOp::Find(value) => {
                let path = self.search_path(value);
                let confirm = if self.contains(value) {
                    PhaseStep::new(format!("Found {} after {} comparisons", value, path.len()))
                        .with_highlight(Highlight::Nodes(vec![*value]))
                } else {
                    PhaseStep::new(format!("{} not found", value))
                };
                PhasePlan::new(
                    snippet,
                    PhaseStep::new(format!("Searching for {}", value))
                        .with_highlight(Highlight::Nodes(path)),
                    confirm,
                )
            }
            TreeOp::Contains(value) => {
                let path = self.search_path(value);
                let confirm = if self.contains(value) {
                    PhaseStep::new(format!("The tree contains {}", value))
                        .with_highlight(Highlight::Nodes(vec![*value]))
                } else {
                    PhaseStep::new(format!("The tree does not contain {}", value))
                };
                PhasePlan::new(
                    snippet,
                    PhaseStep::new(format!("Checking whether {} is in the tree", value))
                        .with_highlight(Highlight::Nodes(path)),
                    confirm,
                )
            }
            TreeOp::Traverse(order) => {
                let visited = self.traverse(*order);
                let confirm = if visited.is_empty() {
                    PhaseStep::new("The tree is empty, nothing to visit")
                } else {
                    PhaseStep::new(format!(
                        "{} traversal: {}",
                        capitalize(order.name()),
                        join(&visited)
                    ))
                    .with_highlight(Highlight::Nodes(visited))
                };
                PhasePlan::new(
                    snippet,
                    PhaseStep::new(format!("Starting {} traversal from the root", order.name())),
                    confirm,
                )
            }
        }
    }

    fn apply(&mut self, op: &TreeOp) -> bool {
        match op {
            TreeOp::Insert(value) => self.insert(*value),
            TreeOp::Remove(value) => self.remove(value),
            TreeOp::Find(_) | TreeOp::Contains(_) | TreeOp::Traverse(_) => false,
        }
    }
}

fn plan_insert(tree: &BinarySearchTree<i64>, snippet: SnippetId, value: i64) -> PhasePlan {
    let path = tree.search_path(&value);
    let prepare = PhaseStep::new(format!("Searching for the insertion point of {}", value))
        .with_highlight(Highlight::Nodes(path.clone()));

    if tree.contains(&value) {
        return PhasePlan::new(
            snippet,
            prepare,
            PhaseStep::new(format!("{} is already in the tree; duplicates are ignored", value))
                .with_highlight(Highlight::Nodes(vec![value])),
        );
    }

    let placement = match path.last() {
        None => "as the root".to_string(),
        Some(parent) if value < *parent => format!("as the left child of {}", parent),
        Some(parent) => format!("as the right child of {}", parent),
    };

    PhasePlan::mutating(
        snippet,
        prepare,
        PhaseStep::new(format!("Attached {} {}", value, placement))
            .with_highlight(Highlight::Nodes(vec![value])),
        PhaseStep::new(format!("{} inserted successfully", value))
            .with_highlight(Highlight::Nodes(vec![value])),
    )
}

fn plan_remove(tree: &BinarySearchTree<i64>, snippet: SnippetId, value: i64) -> PhasePlan {
    let path = tree.search_path(&value);
    let prepare = PhaseStep::new(format!("Locating {}", value))
        .with_highlight(Highlight::Nodes(path));

    let Some(node) = tree.find(&value) else {
        return PhasePlan::new(snippet, prepare, PhaseStep::new(format!("{} not found", value)));
    };

    let mutate = match (node.child_count(), tree.successor_of(&value)) {
        (2, Some(successor)) => PhaseStep::new(format!(
            "{} has two children: copied its in-order successor {} into its place, then removed {} from the right subtree",
            value, successor, successor
        ))
        .with_highlight(Highlight::Nodes(vec![successor])),
        (1, _) => {
            let child = node.left().or(node.right()).map(|child| *child.value());
            let step = PhaseStep::new(format!("{} has one child: spliced it out", value));
            match child {
                Some(child) => step.with_highlight(Highlight::Nodes(vec![child])),
                None => step,
            }
        }
        _ => PhaseStep::new(format!("{} is a leaf: detached it from its parent", value)),
    };

    PhasePlan::mutating(
        snippet,
        prepare,
        mutate,
        PhaseStep::new(format!("{} removed successfully", value)),
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
