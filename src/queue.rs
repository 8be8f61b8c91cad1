use crate::types::Cost;
use std::{cmp::Ordering, collections::BinaryHeap};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueElement<T> {
    pub f: Cost,
    pub g: Cost,
    pub data: T,
}

/// Heap entry: the element plus its insertion index, used as the last tie breaker.
#[derive(Debug)]
struct Entry<T> {
    element: QueueElement<T>,
    order: u64,
}

impl<T> Entry<T> {
    #[inline]
    fn key(&self) -> (Cost, Cost, u64) {
        (self.element.f, self.element.g, self.order)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed, so that the max-heap pops the smallest key.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// A min-queue on `f`. Ties are broken by smaller `g`, and then by insertion
/// order, so that pops are fully deterministic.
///
/// Duplicate entries for the same data are allowed. Callers discard stale
/// entries when they are popped.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    pushed: u64,
}

impl<T> Frontier<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            pushed: 0,
        }
    }

    pub fn push(&mut self, element: QueueElement<T>) {
        debug_assert!(element.g <= element.f, "f must include g");
        self.heap.push(Entry {
            element,
            order: self.pushed,
        });
        self.pushed += 1;
    }

    pub fn pop(&mut self) -> Option<QueueElement<T>> {
        self.heap.pop().map(|e| e.element)
    }
}
