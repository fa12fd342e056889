use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue over a binary heap.
///
/// `min` peeks the lowest element, `delete_min` drops it. Elements that
/// compare equal come out in unspecified order, so callers needing a stable
/// tie-break should fold it into `T`'s ordering.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, value: T) {
        self.heap.push(Reverse(value));
    }

    /// Lowest element, or None when empty.
    pub fn min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(v)| v)
    }

    /// Remove the lowest element. No-op when empty.
    pub fn delete_min(&mut self) {
        self.heap.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_ascending() {
        let mut q = PriorityQueue::new();
        for v in [5, 1, 4, 2, 3] {
            q.insert(v);
        }
        let mut out = Vec::new();
        while let Some(&v) = q.min() {
            out.push(v);
            q.delete_min();
        }
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_duplicates_kept() {
        let mut q = PriorityQueue::with_capacity(4);
        q.insert((2, 7));
        q.insert((2, 7));
        q.insert((1, 3));
        assert_eq!(q.min(), Some(&(1, 3)));
        q.delete_min();
        assert_eq!(q.min(), Some(&(2, 7)));
        q.delete_min();
        assert_eq!(q.min(), Some(&(2, 7)));
        q.delete_min();
        assert_eq!(q.min(), None);
    }

    #[test]
    fn test_empty_queue() {
        let mut q: PriorityQueue<u32> = PriorityQueue::default();
        assert!(q.min().is_none());
        q.delete_min();
        assert!(q.is_empty());
        q.insert(9);
        assert!(!q.is_empty());
        q.delete_min();
        assert!(q.is_empty());
    }
}
