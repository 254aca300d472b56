//! A binary min-heap holding the pending exits of one queue.

use crate::errors::QueueError;

/// A min-heap of priorities.
///
/// Equal keys are allowed but their relative order is unspecified, so callers that need a total
/// order must encode the tie-breaker into the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityQueue<K: Ord> {
    heap: Vec<K>,
}

impl<K: Ord> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<K: Ord> PriorityQueue<K> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue has no entries.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Inserts `key`.
    pub fn insert(&mut self, key: K) {
        self.heap.push(key);
        self.sift_up(self.heap.len() - 1);
    }

    /// Returns the smallest key without removing it.
    pub fn peek_min(&self) -> Option<&K> {
        self.heap.first()
    }

    /// Removes and returns the smallest key.
    pub fn extract_min(&mut self) -> Result<K, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok(min)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx] >= self.heap[parent] {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;

            let mut smallest = idx;
            if left < len && self.heap[left] < self.heap[smallest] {
                smallest = left;
            }
            if right < len && self.heap[right] < self.heap[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }

            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }

    #[cfg(test)]
    fn holds_heap_property(&self) -> bool {
        (1..self.heap.len()).all(|idx| self.heap[(idx - 1) / 2] <= self.heap[idx])
    }
}
