//! Unbalanced binary search tree
//!
//! Every node owns its children through `Option<Box<Node<T>>>`; there are no
//! parent pointers. The tree never rebalances, so inserting already-sorted
//! values degrades it into a linked list of height n. The tutorials use that
//! degenerate shape to motivate balanced trees, so it is preserved.

use std::cmp::Ordering;

/// A single tree node
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Value stored at this node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Left child, if any
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// Right child, if any
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Number of direct children (0, 1 or 2)
    pub fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    fn leftmost(&self) -> &Node<T> {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }
}

/// Binary search tree without duplicates
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySearchTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: Ord + Clone> BinarySearchTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert a value.
    ///
    /// Returns `false` without touching the tree when the value is already
    /// present: the first insertion wins.
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = Self::insert_into(&mut self.root, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn insert_into(slot: &mut Option<Box<Node<T>>>, value: T) -> bool {
        match slot {
            None => {
                *slot = Some(Box::new(Node::leaf(value)));
                true
            }
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => Self::insert_into(&mut node.left, value),
                Ordering::Greater => Self::insert_into(&mut node.right, value),
                Ordering::Equal => false,
            },
        }
    }

    /// Find the node holding `value`
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
    }

    /// Whether `value` is stored
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Remove a value, returning whether it was present.
    ///
    /// A node with two children takes the value of its in-order successor,
    /// which is then removed from the right subtree.
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = Self::remove_from(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_from(slot: &mut Option<Box<Node<T>>>, value: &T) -> bool {
        let Some(node) = slot else {
            return false;
        };

        match value.cmp(&node.value) {
            Ordering::Less => Self::remove_from(&mut node.left, value),
            Ordering::Greater => Self::remove_from(&mut node.right, value),
            Ordering::Equal => {
                match (node.left.take(), node.right.take()) {
                    (None, None) => *slot = None,
                    (Some(child), None) | (None, Some(child)) => *slot = Some(child),
                    (Some(left), Some(right)) => {
                        let successor = right.leftmost().value.clone();
                        node.left = Some(left);
                        node.right = Some(right);
                        // The successor has no left child, so this hits one of the cases above
                        Self::remove_from(&mut node.right, &successor);
                        node.value = successor;
                    }
                }
                true
            }
        }
    }

    /// Values visited by the descent looking for `value`, ending with the
    /// value itself when present
    pub fn search_path(&self, value: &T) -> Vec<T> {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.value.clone());
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => None,
            };
        }
        path
    }

    /// Leftmost value of the right subtree of the node holding `value`.
    ///
    /// This is the replacement used when removing a node with two children.
    pub fn successor_of(&self, value: &T) -> Option<T> {
        self.find(value)
            .and_then(|node| node.right.as_deref())
            .map(|right| right.leftmost().value.clone())
    }

    /// Smallest value, if any
    pub fn min(&self) -> Option<&T> {
        self.root.as_deref().map(|root| &root.leftmost().value)
    }

    /// Largest value, if any
    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.value)
    }

    /// Values in ascending order (left, node, right)
    pub fn in_order(&self) -> Vec<T> {
        fn visit<T: Clone>(node: Option<&Node<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                visit(node.left(), out);
                out.push(node.value.clone());
                visit(node.right(), out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        visit(self.root(), &mut out);
        out
    }

    /// Values in node, left, right order
    pub fn pre_order(&self) -> Vec<T> {
        fn visit<T: Clone>(node: Option<&Node<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                out.push(node.value.clone());
                visit(node.left(), out);
                visit(node.right(), out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        visit(self.root(), &mut out);
        out
    }

    /// Values in left, right, node order
    pub fn post_order(&self) -> Vec<T> {
        fn visit<T: Clone>(node: Option<&Node<T>>, out: &mut Vec<T>) {
            if let Some(node) = node {
                visit(node.left(), out);
                visit(node.right(), out);
                out.push(node.value.clone());
            }
        }

        let mut out = Vec::with_capacity(self.len);
        visit(self.root(), &mut out);
        out
    }

    /// Traverse in the requested order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<T> {
        match order {
            TraversalOrder::InOrder => self.in_order(),
            TraversalOrder::PreOrder => self.pre_order(),
            TraversalOrder::PostOrder => self.post_order(),
        }
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl<T> BinarySearchTree<T> {
    /// Root node, for rendering
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree)
    pub fn height(&self) -> usize {
        fn depth<T>(node: Option<&Node<T>>) -> usize {
            match node {
                None => 0,
                Some(node) => 1 + depth(node.left()).max(depth(node.right())),
            }
        }
        depth(self.root())
    }
}

impl<T: Ord + Clone> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

/// Depth-first visit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
}

impl TraversalOrder {
    pub fn name(&self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
        }
    }
}
