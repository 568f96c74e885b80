//! FIFO queue backed by a contiguous `Vec`
//!
//! `dequeue` removes from the front of the vector and shifts the remaining
//! elements, so it costs O(n). The tutorials contrast this with a ring buffer,
//! so the simple layout is kept on purpose.

/// A first-in, first-out container
#[derive(Debug, Clone, PartialEq)]
pub struct Queue<T> {
    items: Vec<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a value at the back
    pub fn enqueue(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the front value, `None` when empty. O(n).
    pub fn dequeue(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Look at the front value without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Whether the queue holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate from front to back
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
