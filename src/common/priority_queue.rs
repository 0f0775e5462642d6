use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

#[derive(Debug)]
struct HeapEntry<T> {
    priority: f64,
    sequence: usize,
    item: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for HeapEntry<T> {}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior, oldest entry first on ties.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority queue with decrease-key.
///
/// Each item is present at most once. Superseded heap entries are left in
/// place and discarded when they surface.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    live: HashMap<T, (usize, f64)>,
    sequence: usize,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            sequence: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item`, replacing any priority it already has.
    pub fn push(&mut self, item: T, priority: f64) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.live.insert(item.clone(), (sequence, priority));
        self.heap.push(HeapEntry {
            priority,
            sequence,
            item,
        });
    }

    pub fn pop(&mut self) -> Option<T> {
        while let Some(entry) = self.heap.pop() {
            let current = self.live.get(&entry.item).map(|(sequence, _)| *sequence);
            if current == Some(entry.sequence) {
                self.live.remove(&entry.item);
                return Some(entry.item);
            }
        }
        None
    }

    /// Push `item` if absent; lower its priority if `priority` is better than
    /// the queued one; otherwise leave the queue untouched.
    pub fn update(&mut self, item: T, priority: f64) {
        if let Some(current) = self.priority_of(&item) {
            if current <= priority {
                return;
            }
        }
        self.push(item, priority);
    }

    pub fn priority_of(&self, item: &T) -> Option<f64> {
        self.live.get(item).map(|(_, priority)| *priority)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.live.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_in_priority_order() {
        let mut queue = PriorityQueue::new();
        queue.push("b", 2.0);
        queue.push("a", 1.0);
        queue.push("c", 3.0);
        queue.push("d", 1.0);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("d"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), Some("c"));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_update_only_improves() {
        let mut queue = PriorityQueue::new();
        queue.push("a", 1.0);
        queue.push("b", 2.0);

        // Worse priority is ignored.
        queue.update("a", 5.0);
        assert_eq!(queue.priority_of(&"a"), Some(1.0));

        // Better priority moves the item ahead, without duplicating it.
        queue.update("b", 0.5);
        assert_eq!(queue.priority_of(&"b"), Some(0.5));
        assert_eq!(queue.len(), 2);

        // Absent item is pushed.
        queue.update("c", 0.0);
        assert!(queue.contains(&"c"));

        assert_eq!(queue.pop(), Some("c"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), None);
    }
}
