//! Directed weighted graph stored as id-keyed adjacency maps
//!
//! Vertices and edges live in maps owned by the graph, so there are no
//! node objects pointing at each other. Incoming edges are not indexed:
//! removing a vertex scans every adjacency map, O(V + E).

use std::collections::VecDeque;

use ahash::AHashSet;
use indexmap::IndexMap;

/// Vertex identifier
pub type VertexId = String;

/// Edge weight
pub type Weight = f64;

/// Weight used when an edge is added without one
pub const DEFAULT_WEIGHT: Weight = 1.0;

#[derive(Debug, Clone, PartialEq)]
struct Vertex {
    label: String,
    /// Outgoing edges, neighbour id -> weight, in insertion order
    edges: IndexMap<VertexId, Weight>,
}

/// Directed graph with at most one edge per ordered vertex pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: IndexMap<VertexId, Vertex>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Returns `false` if the id is already taken.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>, label: impl Into<String>) -> bool {
        let id = id.into();
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(
            id,
            Vertex {
                label: label.into(),
                edges: IndexMap::new(),
            },
        );
        true
    }

    /// Set the directed edge `source -> target`, overwriting any previous weight.
    ///
    /// Returns `false` if either endpoint is missing. An undirected link takes
    /// two calls.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: Weight) -> bool {
        if !self.vertices.contains_key(target) {
            return false;
        }
        match self.vertices.get_mut(source) {
            Some(vertex) => {
                vertex.edges.insert(target.to_string(), weight);
                true
            }
            None => false,
        }
    }

    /// `add_edge` with [`DEFAULT_WEIGHT`]
    pub fn add_edge_default(&mut self, source: &str, target: &str) -> bool {
        self.add_edge(source, target, DEFAULT_WEIGHT)
    }

    /// Remove a vertex together with every edge that touches it
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        if self.vertices.shift_remove(id).is_none() {
            return false;
        }
        for vertex in self.vertices.values_mut() {
            vertex.edges.shift_remove(id);
        }
        true
    }

    /// Remove the directed edge `source -> target`
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        self.vertices
            .get_mut(source)
            .map(|vertex| vertex.edges.shift_remove(target).is_some())
            .unwrap_or(false)
    }

    /// Whether a vertex with `id` exists
    pub fn has_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    /// Whether the directed edge `source -> target` exists
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.weight(source, target).is_some()
    }

    /// Display label of a vertex
    pub fn label(&self, id: &str) -> Option<&str> {
        self.vertices.get(id).map(|vertex| vertex.label.as_str())
    }

    /// Weight of the edge `source -> target`, if present
    pub fn weight(&self, source: &str, target: &str) -> Option<Weight> {
        self.vertices
            .get(source)
            .and_then(|vertex| vertex.edges.get(target))
            .copied()
    }

    /// Outgoing neighbours of `id` in insertion order
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, Weight)> + 'a {
        self.vertices
            .get(id)
            .into_iter()
            .flat_map(|vertex| {
                vertex
                    .edges
                    .iter()
                    .map(|(target, weight)| (target.as_str(), *weight))
            })
    }

    /// Vertex ids and labels in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vertices
            .iter()
            .map(|(id, vertex)| (id.as_str(), vertex.label.as_str()))
    }

    /// Every edge as `(source, target, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Weight)> {
        self.vertices.iter().flat_map(|(source, vertex)| {
            vertex
                .edges
                .iter()
                .map(move |(target, weight)| (source.as_str(), target.as_str(), *weight))
        })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(|vertex| vertex.edges.len()).sum()
    }

    /// Whether the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Breadth-first visit order from `start`; empty if `start` is unknown
    pub fn bfs(&self, start: &str) -> Vec<VertexId> {
        let Some((start, _)) = self.vertices.get_key_value(start) else {
            return Vec::new();
        };

        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut frontier: VecDeque<&str> = VecDeque::new();
        let mut order = Vec::new();

        visited.insert(start.as_str());
        frontier.push_back(start.as_str());

        while let Some(id) = frontier.pop_front() {
            order.push(id.to_string());
            for (neighbor, _) in self.neighbors(id) {
                if visited.insert(neighbor) {
                    frontier.push_back(neighbor);
                }
            }
        }

        order
    }

    /// Depth-first visit order from `start`; empty if `start` is unknown
    pub fn dfs(&self, start: &str) -> Vec<VertexId> {
        fn visit<'a>(
            graph: &'a Graph,
            id: &'a str,
            visited: &mut AHashSet<&'a str>,
            order: &mut Vec<VertexId>,
        ) {
            visited.insert(id);
            order.push(id.to_string());
            for (neighbor, _) in graph.neighbors(id) {
                if !visited.contains(neighbor) {
                    visit(graph, neighbor, visited, order);
                }
            }
        }

        let Some((start, _)) = self.vertices.get_key_value(start) else {
            return Vec::new();
        };

        let mut visited = AHashSet::new();
        let mut order = Vec::new();
        visit(self, start.as_str(), &mut visited, &mut order);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A→B, A→C, B→D, C→E, D→E
    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D", "E"] {
            graph.add_vertex(id, format!("Vertex {}", id));
        }
        for (source, target) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "E"), ("D", "E")] {
            assert!(graph.add_edge_default(source, target));
        }
        graph
    }

    #[test]
    fn test_bfs_order() {
        let graph = sample_graph();
        assert_eq!(graph.bfs("A"), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_dfs_order() {
        let graph = sample_graph();
        assert_eq!(graph.dfs("A"), vec!["A", "B", "D", "E", "C"]);
    }

    #[test]
    fn test_traversal_from_unknown_start_is_empty() {
        let graph = sample_graph();
        assert!(graph.bfs("Z").is_empty());
        assert!(graph.dfs("Z").is_empty());
    }

    #[test]
    fn test_disconnected_graph_visits_reachable_component_only() {
        let mut graph = sample_graph();
        graph.add_vertex("X", "X");
        graph.add_vertex("Y", "Y");
        graph.add_edge_default("X", "Y");

        let bfs = graph.bfs("A");
        let dfs = graph.dfs("A");
        assert_eq!(bfs.len(), 5);
        assert_eq!(dfs.len(), 5);
        assert!(!bfs.contains(&"X".to_string()));
        assert_eq!(graph.bfs("X"), vec!["X", "Y"]);
    }

    #[test]
    fn test_cycles_visit_each_vertex_once() {
        let mut graph = sample_graph();
        graph.add_edge_default("E", "A");
        graph.add_edge_default("D", "B");

        for order in [graph.bfs("C"), graph.dfs("C")] {
            let unique: AHashSet<&String> = order.iter().collect();
            assert_eq!(order.len(), 5);
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let mut graph = Graph::new();
        assert!(graph.add_vertex("A", "first"));
        assert!(!graph.add_vertex("A", "second"));
        assert_eq!(graph.label("A"), Some("first"));
    }

    #[test]
    fn test_edge_requires_both_endpoints() {
        let mut graph = Graph::new();
        graph.add_vertex("A", "A");
        assert!(!graph.add_edge("A", "B", 2.0));
        assert!(!graph.add_edge("B", "A", 2.0));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_is_directed_and_overwrites() {
        let mut graph = sample_graph();
        assert!(graph.has_edge("A", "B"));
        assert!(!graph.has_edge("B", "A"));

        assert!(graph.add_edge("A", "B", 4.5));
        assert_eq!(graph.weight("A", "B"), Some(4.5));
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_remove_vertex_drops_incoming_and_outgoing_edges() {
        let mut graph = sample_graph();
        assert!(graph.remove_vertex("E"));
        assert!(!graph.has_vertex("E"));
        assert!(graph.edges().all(|(source, target, _)| source != "E" && target != "E"));

        assert!(graph.remove_vertex("B"));
        assert!(graph.edges().all(|(source, target, _)| source != "B" && target != "B"));
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.remove_vertex("B"));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = sample_graph();
        assert!(graph.remove_edge("A", "C"));
        assert!(!graph.remove_edge("A", "C"));
        assert!(!graph.remove_edge("Q", "A"));
        assert_eq!(graph.bfs("A"), vec!["A", "B", "D", "E"]);
    }

    #[test]
    fn test_vertices_keep_insertion_order() {
        let mut graph = sample_graph();
        graph.remove_vertex("B");
        let ids: Vec<&str> = graph.vertices().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["A", "C", "D", "E"]);
    }
}
