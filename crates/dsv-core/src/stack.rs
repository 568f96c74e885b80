//! LIFO stack backed by a `Vec`

/// A last-in, first-out container
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push a value on top
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Remove and return the top value, `None` when empty
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Look at the top value without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Whether the stack holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on the stack
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate from bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_in_first_out() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek(), Some(&3));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_stack_returns_none() {
        let mut stack: Stack<i64> = Stack::new();
        assert_eq!(stack.peek(), None);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_iter_is_bottom_to_top() {
        let stack: Stack<i64> = [4, 5, 6].into_iter().collect();
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    }
}
