//! Phase plans and the state published to visual components

use std::fmt;

use dsv_core::VertexId;
use serde::{Deserialize, Serialize};

use crate::snippets::SnippetId;

/// Structure families that have a visualizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureFamily {
    Stack,
    Queue,
    Tree,
    Graph,
    HashTable,
}

impl fmt::Display for StructureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StructureFamily::Stack => "stack",
            StructureFamily::Queue => "queue",
            StructureFamily::Tree => "binary search tree",
            StructureFamily::Graph => "graph",
            StructureFamily::HashTable => "hash table",
        };
        f.write_str(name)
    }
}

/// Sequencer state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing in flight, resting display
    #[default]
    Idle,
    /// Operation located and explained, structure untouched
    Prepare,
    /// The structure has just been mutated
    Mutate,
    /// Completion message
    Confirm,
}

/// Part of a structure a visual component should emphasize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Highlight {
    /// Stack or queue position, 0 = bottom / front
    Slot(usize),
    /// Tree nodes by value, in visit order
    Nodes(Vec<i64>),
    /// Whole hash bucket
    Bucket(usize),
    /// Single entry inside a hash bucket
    Entry { bucket: usize, index: usize },
    Vertex(VertexId),
    Edge { from: VertexId, to: VertexId },
    /// Graph traversal visit order
    Visit(Vec<VertexId>),
}

/// Description and highlight for a single phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseStep {
    pub description: String,
    pub highlight: Option<Highlight>,
}

impl PhaseStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

/// Ordered phases an operation is decomposed into.
///
/// A plan without a mutate step is read-only and goes straight from
/// Prepare to Confirm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhasePlan {
    pub snippet: SnippetId,
    pub prepare: PhaseStep,
    pub mutate: Option<PhaseStep>,
    pub confirm: PhaseStep,
}

impl PhasePlan {
    /// Read-only plan
    pub fn new(snippet: SnippetId, prepare: PhaseStep, confirm: PhaseStep) -> Self {
        Self {
            snippet,
            prepare,
            mutate: None,
            confirm,
        }
    }

    /// Plan that mutates the structure at the Prepare -> Mutate boundary
    pub fn mutating(
        snippet: SnippetId,
        prepare: PhaseStep,
        mutate: PhaseStep,
        confirm: PhaseStep,
    ) -> Self {
        Self {
            snippet,
            prepare,
            mutate: Some(mutate),
            confirm,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.mutate.is_none()
    }

    /// Step shown during `phase`
    pub fn step(&self, phase: Phase) -> Option<&PhaseStep> {
        match phase {
            Phase::Idle => None,
            Phase::Prepare => Some(&self.prepare),
            Phase::Mutate => self.mutate.as_ref(),
            Phase::Confirm => Some(&self.confirm),
        }
    }
}

/// Snapshot handed to subscribers on every phase change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseContext {
    pub family: StructureFamily,
    /// Operation counter; bumps on every invoke and cancel
    pub generation: u64,
    pub phase: Phase,
    pub description: Option<String>,
    pub snippet: Option<SnippetId>,
    pub highlight: Option<Highlight>,
}

impl PhaseContext {
    /// Resting state with nothing published
    pub fn idle(family: StructureFamily, generation: u64) -> Self {
        Self {
            family,
            generation,
            phase: Phase::Idle,
            description: None,
            snippet: None,
            highlight: None,
        }
    }

    pub(crate) fn from_plan(
        family: StructureFamily,
        generation: u64,
        phase: Phase,
        plan: &PhasePlan,
    ) -> Self {
        match plan.step(phase) {
            Some(step) => Self {
                family,
                generation,
                phase,
                description: Some(step.description.clone()),
                snippet: Some(plan.snippet),
                highlight: step.highlight.clone(),
            },
            None => Self::idle(family, generation),
        }
    }

    /// Reference code for the current operation
    pub fn code(&self) -> Option<&'static str> {
        self.snippet.and_then(|snippet| snippet.text())
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}
