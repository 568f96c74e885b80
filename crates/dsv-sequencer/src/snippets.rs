//! Reference code excerpts shown next to each animation
//!
//! Display data only, keyed by structure family and operation name.

use serde::Serialize;

use crate::phase::StructureFamily;

/// Key into the snippet table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SnippetId {
    pub family: StructureFamily,
    pub operation: &'static str,
}

impl SnippetId {
    pub const fn new(family: StructureFamily, operation: &'static str) -> Self {
        Self { family, operation }
    }

    /// Look up the excerpt, `None` for an unknown key
    pub fn text(&self) -> Option<&'static str> {
        snippet(self.family, self.operation)
    }
}

/// Excerpt for `operation` on `family`
pub fn snippet(family: StructureFamily, operation: &str) -> Option<&'static str> {
    use StructureFamily::*;

    let text = match (family, operation) {
        (Stack, "push") => STACK_PUSH,
        (Stack, "pop") => STACK_POP,
        (Stack, "peek") => STACK_PEEK,

        (Queue, "enqueue") => QUEUE_ENQUEUE,
        (Queue, "dequeue") => QUEUE_DEQUEUE,
        (Queue, "peek") => QUEUE_PEEK,

        (Tree, "insert") => TREE_INSERT,
        (Tree, "remove") => TREE_REMOVE,
        (Tree, "find") => TREE_FIND,
        (Tree, "contains") => TREE_CONTAINS,
        (Tree, "in-order") => TREE_IN_ORDER,
        (Tree, "pre-order") => TREE_PRE_ORDER,
        (Tree, "post-order") => TREE_POST_ORDER,

        (Graph, "add_vertex") => GRAPH_ADD_VERTEX,
        (Graph, "add_edge") => GRAPH_ADD_EDGE,
        (Graph, "remove_vertex") => GRAPH_REMOVE_VERTEX,
        (Graph, "remove_edge") => GRAPH_REMOVE_EDGE,
        (Graph, "bfs") => GRAPH_BFS,
        (Graph, "dfs") => GRAPH_DFS,

        (HashTable, "set") => HASH_SET,
        (HashTable, "get") => HASH_GET,
        (HashTable, "delete") => HASH_DELETE,
        (HashTable, "has") => HASH_HAS,

        _ => return None,
    };
    Some(text)
}

const STACK_PUSH: &str = "\
pub fn push(&mut self, value: T) {
    self.items.push(value);
}";

const STACK_POP: &str = "\
pub fn pop(&mut self) -> Option<T> {
    self.items.pop()
}";

const STACK_PEEK: &str = "\
pub fn peek(&self) -> Option<&T> {
    self.items.last()
}";

const QUEUE_ENQUEUE: &str = "\
pub fn enqueue(&mut self, value: T) {
    self.items.push(value);
}";

const QUEUE_DEQUEUE: &str = "\
pub fn dequeue(&mut self) -> Option<T> {
    if self.items.is_empty() {
        None
    } else {
        Some(self.items.remove(0)) // shifts every element: O(n)
    }
}";

const QUEUE_PEEK: &str = "\
pub fn peek(&self) -> Option<&T> {
    self.items.first()
}";

const TREE_INSERT: &str = "\
fn insert_into(slot: &mut Option<Box<Node<T>>>, value: T) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(Node::leaf(value)));
            true
        }
        Some(node) => match value.cmp(&node.value) {
            Ordering::Less => insert_into(&mut node.left, value),
            Ordering::Greater => insert_into(&mut node.right, value),
            Ordering::Equal => false, // duplicates are ignored
        },
    }
}";

const TREE_REMOVE: &str = "\
fn remove_from(slot: &mut Option<Box<Node<T>>>, value: &T) -> bool {
    let Some(node) = slot else { return false };
    match value.cmp(&node.value) {
        Ordering::Less => remove_from(&mut node.left, value),
        Ordering::Greater => remove_from(&mut node.right, value),
        Ordering::Equal => {
            match (node.left.take(), node.right.take()) {
                (None, None) => *slot = None,
                (Some(child), None) | (None, Some(child)) => *slot = Some(child),
                (Some(left), Some(right)) => {
                    let successor = right.leftmost().value.clone();
                    node.left = Some(left);
                    node.right = Some(right);
                    remove_from(&mut node.right, &successor);
                    node.value = successor;
                }
            }
            true
        }
    }
}";

const TREE_FIND: &str = "\
pub fn find(&self, value: &T) -> Option<&Node<T>> {
    let mut current = self.root.as_deref();
    while let Some(node) = current {
        current = match value.cmp(&node.value) {
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
            Ordering::Equal => return Some(node),
        };
    }
    None
}";

const TREE_CONTAINS: &str = "\
pub fn contains(&self, value: &T) -> bool {
    self.find(value).is_some()
}";

const TREE_IN_ORDER: &str = "\
fn visit(node: Option<&Node<T>>, out: &mut Vec<T>) {
    if let Some(node) = node {
        visit(node.left(), out);
        out.push(node.value.clone());
        visit(node.right(), out);
    }
}";

const TREE_PRE_ORDER: &str = "\
fn visit(node: Option<&Node<T>>, out: &mut Vec<T>) {
    if let Some(node) = node {
        out.push(node.value.clone());
        visit(node.left(), out);
        visit(node.right(), out);
    }
}";

const TREE_POST_ORDER: &str = "\
fn visit(node: Option<&Node<T>>, out: &mut Vec<T>) {
    if let Some(node) = node {
        visit(node.left(), out);
        visit(node.right(), out);
        out.push(node.value.clone());
    }
}";

const GRAPH_ADD_VERTEX: &str = "\
pub fn add_vertex(&mut self, id: VertexId, label: String) -> bool {
    if self.vertices.contains_key(&id) {
        return false;
    }
    self.vertices.insert(id, Vertex { label, edges: IndexMap::new() });
    true
}";

const GRAPH_ADD_EDGE: &str = "\
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
}";

const GRAPH_REMOVE_VERTEX: &str = "\
pub fn remove_vertex(&mut self, id: &str) -> bool {
    if self.vertices.shift_remove(id).is_none() {
        return false;
    }
    // incoming edges are not indexed: scan every vertex
    for vertex in self.vertices.values_mut() {
        vertex.edges.shift_remove(id);
    }
    true
}";

const GRAPH_REMOVE_EDGE: &str = "\
pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
    self.vertices
        .get_mut(source)
        .map(|vertex| vertex.edges.shift_remove(target).is_some())
        .unwrap_or(false)
}";

const GRAPH_BFS: &str = "\
visited.insert(start);
frontier.push_back(start);
while let Some(id) = frontier.pop_front() {
    order.push(id.to_string());
    for (neighbor, _) in self.neighbors(id) {
        if visited.insert(neighbor) {
            frontier.push_back(neighbor);
        }
    }
}";

const GRAPH_DFS: &str = "\
fn visit(graph: &Graph, id: &str, visited: &mut AHashSet<&str>, order: &mut Vec<VertexId>) {
    visited.insert(id);
    order.push(id.to_string());
    for (neighbor, _) in graph.neighbors(id) {
        if !visited.contains(neighbor) {
            visit(graph, neighbor, visited, order);
        }
    }
}";

const HASH_SET: &str = "\
pub fn set(&mut self, key: String, value: V) -> bool {
    let index = self.hash(&key);
    let bucket = &mut self.buckets[index];
    if let Some(entry) = bucket.iter_mut().find(|(existing, _)| *existing == key) {
        entry.1 = value;
        return false;
    }
    bucket.push((key, value));
    true
}";

const HASH_GET: &str = "\
pub fn get(&self, key: &str) -> Option<&V> {
    self.buckets[self.hash(key)]
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value)
}";

const HASH_DELETE: &str = "\
pub fn delete(&mut self, key: &str) -> bool {
    let index = self.hash(key);
    let bucket = &mut self.buckets[index];
    match bucket.iter().position(|(existing, _)| existing == key) {
        Some(position) => {
            bucket.remove(position);
            true
        }
        None => false,
    }
}";

const HASH_HAS: &str = "\
pub fn has(&self, key: &str) -> bool {
    self.locate(key).is_some()
}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operation_has_no_snippet() {
        assert!(snippet(StructureFamily::Stack, "enqueue").is_none());
        assert!(SnippetId::new(StructureFamily::Graph, "dijkstra").text().is_none());
    }

    #[test]
    fn test_snippet_lookup() {
        let text = SnippetId::new(StructureFamily::Queue, "dequeue").text().unwrap();
        assert!(text.contains("remove(0)"));

        let text = SnippetId::new(StructureFamily::Tree, "contains").text().unwrap();
        assert!(text.contains("self.find(value).is_some()"));
    }
}
