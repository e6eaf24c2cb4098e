//! Lazy-deletion min-heap shared by the relaxation engines
//!
//! Dijkstra, Prim and A* all follow the same discipline: instead of a
//! decrease-key operation, a new entry is pushed on every improving
//! relaxation and outdated entries are discarded when they surface.
//! This module implements that discipline once over `std::collections::BinaryHeap`.
//!
//! # Ordering
//! Entries are ordered by `(priority, key, item)` ascending. `priority` is
//! what the heap minimises (distance, edge weight, or `f = g + h`), `key` is
//! the value compared against the caller's best-known table when deciding
//! staleness (distance, edge weight, or `g`), and `item` breaks the remaining
//! ties deterministically (smaller vertex index or coordinate first).
//! Floats are compared with `f64::total_cmp`, so the order is total even for
//! infinities.
//!
//! # Algorithmic Complexity
//! - `push`: O(log N)
//! - `pop_live`: O(k log N) where k is the number of stale entries skipped
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Heap entry with reversed ordering so `BinaryHeap` behaves as a min-heap
#[derive(Debug, Clone)]
struct HeapEntry<T> {
    priority: f64,
    key: f64,
    item: T,
}

impl<T: Ord> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for HeapEntry<T> {}

impl<T: Ord> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.key.total_cmp(&self.key))
            .then_with(|| other.item.cmp(&self.item))
    }
}

/// Heap statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapStats {
    pub pushes: u64,
    pub pops: u64,
    pub stale_discarded: u64,
}

/// Min-heap with lazy deletion of outdated entries
#[derive(Debug, Clone)]
pub struct LazyPriorityQueue<T: Ord> {
    heap: BinaryHeap<HeapEntry<T>>,
    stats: HeapStats,
}

impl<T: Ord> LazyPriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            stats: HeapStats::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            stats: HeapStats::default(),
        }
    }

    /// Pushes an entry ordered by `priority`, with `key` used for staleness
    pub fn push(&mut self, priority: f64, key: f64, item: T) {
        self.stats.pushes += 1;
        self.heap.push(HeapEntry { priority, key, item });
    }

    /// Pushes an entry whose priority is its key (Dijkstra, Prim)
    pub fn push_keyed(&mut self, key: f64, item: T) {
        self.push(key, key, item);
    }

    /// Pops the minimum entry without any staleness check
    pub fn pop(&mut self) -> Option<(f64, f64, T)> {
        let entry = self.heap.pop()?;
        self.stats.pops += 1;
        Some((entry.priority, entry.key, entry.item))
    }

    /// Pops the minimum live entry as `(key, item)`
    ///
    /// `best` reports the caller's current best key for an item. Entries
    /// whose key exceeds it are outdated and discarded. An entry whose key
    /// equals the best is live.
    pub fn pop_live<F>(&mut self, mut best: F) -> Option<(f64, T)>
    where
        F: FnMut(&T) -> f64,
    {
        while let Some((_, key, item)) = self.pop() {
            if key > best(&item) {
                self.stats.stale_discarded += 1;
                continue;
            }
            return Some((key, item));
        }
        None
    }

    /// Priority of the current minimum entry, stale or not
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.priority)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empties the heap, keeping the statistics
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn stats(&self) -> HeapStats {
        self.stats
    }
}

impl<T: Ord> Default for LazyPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
