//! Queue animations

use dsv_core::Queue;

use crate::animated::Animated;
use crate::error::OperationError;
use crate::phase::{Highlight, PhasePlan, PhaseStep, StructureFamily};
use crate::snippets::SnippetId;

#[derive(Debug, Clone, PartialEq)]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
    Peek,
}

impl QueueOp {
    pub fn name(&self) -> &'static str {
        match self {
            QueueOp::Enqueue(_) => "enqueue",
            QueueOp::Dequeue => "dequeue",
            QueueOp::Peek => "peek",
        }
    }
}

impl Animated for Queue<i64> {
    type Op = QueueOp;
    /// Dequeued value, `None` for enqueue
    type Output = Option<i64>;

    const FAMILY: StructureFamily = StructureFamily::Queue;

    fn check(&self, op: &QueueOp) -> Result<(), OperationError> {
        match op {
            QueueOp::Dequeue | QueueOp::Peek if self.is_empty() => {
                Err(OperationError::EmptyStructure(Self::FAMILY))
            }
            _ => Ok(()),
        }
    }

    fn plan(&self, op: &QueueOp) -> PhasePlan {
        let snippet = SnippetId::new(Self::FAMILY, op.name());
        let len = self.len();

        match (op, self.peek().copied()) {
            (QueueOp::Enqueue(value), _) => PhasePlan::mutating(
                snippet,
                PhaseStep::new(format!("Adding {} to the back of the queue", value)),
                PhaseStep::new(format!("{} joined the queue at position {}", value, len + 1))
                    .with_highlight(Highlight::Slot(len)),
                PhaseStep::new(format!("{} enqueued successfully", value))
                    .with_highlight(Highlight::Slot(len)),
            ),
            (QueueOp::Dequeue, Some(front)) => PhasePlan::mutating(
                snippet,
                PhaseStep::new(format!("Removing the front item ({})", front))
                    .with_highlight(Highlight::Slot(0)),
                PhaseStep::new(format!(
                    "Dequeued {}; the remaining {} items shift forward",
                    front,
                    len - 1
                )),
                PhaseStep::new(format!("Dequeue complete, {} items remain", len - 1)),
            ),
            (QueueOp::Peek, Some(front)) => PhasePlan::new(
                snippet,
                PhaseStep::new("Looking at the front of the queue")
                    .with_highlight(Highlight::Slot(0)),
                PhaseStep::new(format!("The front item is {}", front))
                    .with_highlight(Highlight::Slot(0)),
            ),
            (QueueOp::Dequeue | QueueOp::Peek, None) => PhasePlan::new(
                snippet,
                PhaseStep::new("Looking at the front of the queue"),
                PhaseStep::new("The queue is empty"),
            ),
        }
    }

    fn apply(&mut self, op: &QueueOp) -> Option<i64> {
        match op {
            QueueOp::Enqueue(value) => {
                self.enqueue(*value);
                None
            }
            QueueOp::Dequeue => self.dequeue(),
            QueueOp::Peek => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Sequencer;

    #[test]
    fn test_dequeue_plan_highlights_front() {
        let queue: Queue<i64> = [7, 8, 9].into_iter().collect();
        let plan = queue.plan(&QueueOp::Dequeue);
        assert_eq!(plan.prepare.highlight, Some(Highlight::Slot(0)));
        assert_eq!(plan.confirm.description, "Dequeue complete, 2 items remain");
    }

    #[test]
    fn test_animated_dequeue_returns_front() {
        let sequencer = Sequencer::new([7, 8].into_iter().collect::<Queue<i64>>());
        sequencer.try_invoke(QueueOp::Dequeue).unwrap();
        sequencer.run_to_idle();

        assert_eq!(sequencer.last_output(), Some(Some(7)));
        assert_eq!(sequencer.structure().read().peek(), Some(&8));
    }

    #[test]
    fn test_empty_preconditions() {
        let queue: Queue<i64> = Queue::new();
        assert_eq!(
            queue.check(&QueueOp::Dequeue),
            Err(OperationError::EmptyStructure(StructureFamily::Queue))
        );
        assert!(queue.check(&QueueOp::Enqueue(1)).is_ok());
    }
}
