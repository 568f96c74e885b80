//! Stack animations

use dsv_core::Stack;

use crate::animated::Animated;
use crate::error::OperationError;
use crate::phase::{Highlight, PhasePlan, PhaseStep, StructureFamily};
use crate::snippets::SnippetId;

#[derive(Debug, Clone, PartialEq)]
pub enum StackOp {
    Push(i64),
    Pop,
    Peek,
}

impl StackOp {
    pub fn name(&self) -> &'static str {
        match self {
            StackOp::Push(_) => "push",
            StackOp::Pop => "pop",
            StackOp::Peek => "peek",
        }
    }
}

impl Animated for Stack<i64> {
    type Op = StackOp;
    /// Popped value, `None` for push
    type Output = Option<i64>;

    const FAMILY: StructureFamily = StructureFamily::Stack;

    fn check(&self, op: &StackOp) -> Result<(), OperationError> {
        match op {
            StackOp::Pop | StackOp::Peek if self.is_empty() => {
                Err(OperationError::EmptyStructure(Self::FAMILY))
            }
            _ => Ok(()),
        }
    }

    fn plan(&self, op: &StackOp) -> PhasePlan {
        let snippet = SnippetId::new(Self::FAMILY, op.name());
        let len = self.len();
        let top = self.peek().copied();

        match (op, top) {
            (StackOp::Push(value), _) => PhasePlan::mutating(
                snippet,
                PhaseStep::new(format!("Pushing {} onto the top of the stack", value)),
                PhaseStep::new(format!(
                    "{} is the new top; the stack holds {} items",
                    value,
                    len + 1
                ))
                .with_highlight(Highlight::Slot(len)),
                PhaseStep::new(format!("{} pushed successfully", value))
                    .with_highlight(Highlight::Slot(len)),
            ),
            (StackOp::Pop, Some(top)) => PhasePlan::mutating(
                snippet,
                PhaseStep::new(format!("Removing the top item ({})", top))
                    .with_highlight(Highlight::Slot(len - 1)),
                PhaseStep::new(format!("Popped {}", top)),
                PhaseStep::new(format!("Pop complete, {} items remain", len - 1)),
            ),
            (StackOp::Peek, Some(top)) => PhasePlan::new(
                snippet,
                PhaseStep::new("Looking at the top of the stack")
                    .with_highlight(Highlight::Slot(len - 1)),
                PhaseStep::new(format!("The top item is {}", top))
                    .with_highlight(Highlight::Slot(len - 1)),
            ),
            (StackOp::Pop | StackOp::Peek, None) => PhasePlan::new(
                snippet,
                PhaseStep::new("Looking at the top of the stack"),
                PhaseStep::new("The stack is empty"),
            ),
        }
    }

    fn apply(&mut self, op: &StackOp) -> Option<i64> {
        match op {
            StackOp::Push(value) => {
                self.push(*value);
                None
            }
            StackOp::Pop => self.pop(),
            StackOp::Peek => None,
        }
    }
}
