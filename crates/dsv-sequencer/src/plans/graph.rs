//! Graph animations

use dsv_core::{Graph, VertexId, Weight};

use super::join;
use crate::animated::Animated;
use crate::error::OperationError;
use crate::phase::{Highlight, PhasePlan, PhaseStep, StructureFamily};
use crate::snippets::SnippetId;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    AddVertex { id: VertexId, label: String },
    AddEdge { from: VertexId, to: VertexId, weight: Weight },
    RemoveVertex(VertexId),
    RemoveEdge { from: VertexId, to: VertexId },
    Bfs(VertexId),
    Dfs(VertexId),
}

impl GraphOp {
    pub fn name(&self) -> &'static str {
        match self {
            GraphOp::AddVertex { .. } => "add_vertex",
            GraphOp::AddEdge { .. } => "add_edge",
            GraphOp::RemoveVertex(_) => "remove_vertex",
            GraphOp::RemoveEdge { .. } => "remove_edge",
            GraphOp::Bfs(_) => "bfs",
            GraphOp::Dfs(_) => "dfs",
        }
    }
}

fn require_vertex(graph: &Graph, id: &str) -> Result<(), OperationError> {
    if graph.has_vertex(id) {
        Ok(())
    } else {
        Err(OperationError::VertexNotFound(id.to_string()))
    }
}

impl Animated for Graph {
    type Op = GraphOp;
    /// Whether the graph changed
    type Output = bool;

    const FAMILY: StructureFamily = StructureFamily::Graph;

    fn check(&self, op: &GraphOp) -> Result<(), OperationError> {
        match op {
            GraphOp::AddVertex { id, .. } if self.has_vertex(id) => {
                Err(OperationError::DuplicateVertex(id.clone()))
            }
            GraphOp::AddVertex { .. } => Ok(()),
            GraphOp::AddEdge { from, to, .. } => {
                require_vertex(self, from)?;
                require_vertex(self, to)
            }
            GraphOp::RemoveVertex(id) | GraphOp::Bfs(id) | GraphOp::Dfs(id) => {
                require_vertex(self, id)
            }
            GraphOp::RemoveEdge { from, to } if !self.has_edge(from, to) => {
                Err(OperationError::EdgeNotFound {
                    from: from.clone(),
                    to: to.clone(),
                })
            }
            GraphOp::RemoveEdge { .. } => Ok(()),
        }
    }

    fn plan(&self, op: &GraphOp) -> PhasePlan {
        let snippet = SnippetId::new(Self::FAMILY, op.name());

        match op {
            GraphOp::AddVertex { id, label } => {
                let prepare = PhaseStep::new(format!("Adding vertex {} ({})", id, label));
                if self.has_vertex(id) {
                    return PhasePlan::new(
                        snippet,
                        prepare,
                        PhaseStep::new(format!("Vertex {} already exists", id))
                            .with_highlight(Highlight::Vertex(id.clone())),
                    );
                }
                PhasePlan::mutating(
                    snippet,
                    prepare,
                    PhaseStep::new(format!("Vertex {} added with an empty adjacency list", id))
                        .with_highlight(Highlight::Vertex(id.clone())),
                    PhaseStep::new(format!("Vertex {} added successfully", id))
                        .with_highlight(Highlight::Vertex(id.clone())),
                )
            }
            GraphOp::AddEdge { from, to, weight } => {
                let edge = Highlight::Edge {
                    from: from.clone(),
                    to: to.clone(),
                };
                let prepare = PhaseStep::new(format!("Connecting {} to {}", from, to))
                    .with_highlight(Highlight::Vertex(from.clone()));
                if !self.has_vertex(from) || !self.has_vertex(to) {
                    return PhasePlan::new(
                        snippet,
                        prepare,
                        PhaseStep::new(format!(
                            "Cannot connect {} to {}: both vertices must exist",
                            from, to
                        )),
                    );
                }
                let mutate = match self.weight(from, to) {
                    Some(previous) => format!(
                        "Updated edge {} → {} from weight {} to {}",
                        from, to, previous, weight
                    ),
                    None => format!("Added edge {} → {} with weight {}", from, to, weight),
                };
                PhasePlan::mutating(
                    snippet,
                    prepare,
                    PhaseStep::new(mutate).with_highlight(edge.clone()),
                    PhaseStep::new(format!("Edge {} → {} set successfully", from, to))
                        .with_highlight(edge),
                )
            }
            GraphOp::RemoveVertex(id) => {
                if !self.has_vertex(id) {
                    return PhasePlan::new(
                        snippet,
                        PhaseStep::new(format!("Looking for vertex {}", id)),
                        PhaseStep::new(format!("Vertex {} not found", id)),
                    );
                }
                let incident = self
                    .edges()
                    .filter(|(from, to, _)| from == id || to == id)
                    .count();
                PhasePlan::mutating(
                    snippet,
                    PhaseStep::new(format!(
                        "Removing vertex {}: scanning every adjacency list for its {} incident edges",
                        id, incident
                    ))
                    .with_highlight(Highlight::Vertex(id.clone())),
                    PhaseStep::new(format!("Vertex {} and its edges removed", id)),
                    PhaseStep::new(format!("Vertex {} removed successfully", id)),
                )
            }
            GraphOp::RemoveEdge { from, to } => {
                let edge = Highlight::Edge {
                    from: from.clone(),
                    to: to.clone(),
                };
                let prepare = PhaseStep::new(format!("Looking for edge {} → {}", from, to))
                    .with_highlight(edge);
                if !self.has_edge(from, to) {
                    return PhasePlan::new(
                        snippet,
                        prepare,
                        PhaseStep::new(format!("Edge {} → {} not found", from, to)),
                    );
                }
                PhasePlan::mutating(
                    snippet,
                    prepare,
                    PhaseStep::new(format!("Edge {} → {} removed", from, to))
                        .with_highlight(Highlight::Vertex(from.clone())),
                    PhaseStep::new(format!("Edge {} → {} removed successfully", from, to)),
                )
            }
            GraphOp::Bfs(start) => plan_traversal(snippet, start, "breadth-first", self.bfs(start)),
            GraphOp::Dfs(start) => plan_traversal(snippet, start, "depth-first", self.dfs(start)),
        }
    }

    fn apply(&mut self, op: &GraphOp) -> bool {
        match op {
            GraphOp::AddVertex { id, label } => self.add_vertex(id.clone(), label.clone()),
            GraphOp::AddEdge { from, to, weight } => self.add_edge(from, to, *weight),
            GraphOp::RemoveVertex(id) => self.remove_vertex(id),
            GraphOp::RemoveEdge { from, to } => self.remove_edge(from, to),
            GraphOp::Bfs(_) | GraphOp::Dfs(_) => false,
        }
    }
}

fn plan_traversal(
    snippet: SnippetId,
    start: &str,
    kind: &str,
    order: Vec<VertexId>,
) -> PhasePlan {
    let prepare = PhaseStep::new(format!("Starting {} search from {}", kind, start))
        .with_highlight(Highlight::Vertex(start.to_string()));
    let confirm = if order.is_empty() {
        PhaseStep::new(format!("Vertex {} not found, nothing to visit", start))
    } else {
        PhaseStep::new(format!("Visit order: {}", join(&order)))
            .with_highlight(Highlight::Visit(order))
    };
    PhasePlan::new(snippet, prepare, confirm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Sequencer;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D", "E"] {
            graph.add_vertex(id, id);
        }
        for (from, to) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "E"), ("D", "E")] {
            graph.add_edge_default(from, to);
        }
        graph
    }

    #[test]
    fn test_bfs_plan_publishes_visit_order() {
        let plan = sample_graph().plan(&GraphOp::Bfs("A".to_string()));
        assert!(plan.is_read_only());
        assert_eq!(plan.confirm.description, "Visit order: A, B, C, D, E");
        assert_eq!(
            plan.confirm.highlight,
            Some(Highlight::Visit(
                ["A", "B", "C", "D", "E"].into_iter().map(String::from).collect()
            ))
        );
    }

    #[test]
    fn test_check_rejects_missing_endpoints() {
        let graph = sample_graph();
        let op = GraphOp::AddEdge {
            from: "A".to_string(),
            to: "Z".to_string(),
            weight: 1.0,
        };
        assert_eq!(graph.check(&op), Err(OperationError::VertexNotFound("Z".to_string())));
        assert_eq!(
            graph.check(&GraphOp::AddVertex {
                id: "A".to_string(),
                label: "again".to_string()
            }),
            Err(OperationError::DuplicateVertex("A".to_string()))
        );
        assert!(matches!(
            graph.check(&GraphOp::RemoveEdge {
                from: "B".to_string(),
                to: "A".to_string()
            }),
            Err(OperationError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_vertex_plan_counts_incident_edges() {
        let plan = sample_graph().plan(&GraphOp::RemoveVertex("E".to_string()));
        assert!(plan.prepare.description.contains("its 2 incident edges"));
    }

    #[test]
    fn test_edge_weight_update_is_described() {
        let plan = sample_graph().plan(&GraphOp::AddEdge {
            from: "A".to_string(),
            to: "B".to_string(),
            weight: 3.0,
        });
        assert_eq!(
            plan.mutate.unwrap().description,
            "Updated edge A → B from weight 1 to 3"
        );
    }

    #[test]
    fn test_animated_remove_vertex() {
        let sequencer = Sequencer::new(sample_graph());
        sequencer.try_invoke(GraphOp::RemoveVertex("D".to_string())).unwrap();
        sequencer.run_to_idle();

        let graph = sequencer.structure();
        let graph = graph.read();
        assert!(!graph.has_vertex("D"));
        assert!(graph.edges().all(|(from, to, _)| from != "D" && to != "D"));
        assert_eq!(graph.bfs("A"), vec!["A", "B", "C", "E"]);
    }
}
