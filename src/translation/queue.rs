/*!
 * Priority queue releasing results by ordering key.
 *
 * `ResultOrderingQueue` is a min-heap on the ordering key; entries with equal
 * keys come out in insertion order. `ReorderBuffer` sits on top of it and only
 * releases the entry whose key is the next one expected, which turns results
 * completing out of order back into request order.
 */

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::types::TranslationResult;

/// Items that carry their own release key
pub trait Keyed {
    /// Smaller keys are released first
    fn ordering_key(&self) -> u64;
}

impl Keyed for TranslationResult {
    fn ordering_key(&self) -> u64 {
        self.ordering_key
    }
}

/// Heap slot; inverted so `BinaryHeap` pops the smallest key, oldest first
struct Slot<T> {
    key: u64,
    insertion: u64,
    item: T,
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.insertion == other.insertion
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.insertion.cmp(&self.insertion))
    }
}

/// Min-priority queue on `Keyed::ordering_key`
pub struct ResultOrderingQueue<T: Keyed = TranslationResult> {
    heap: BinaryHeap<Slot<T>>,
    inserted: u64,
}

impl<T: Keyed> ResultOrderingQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            inserted: 0,
        }
    }

    /// Add an item
    pub fn push(&mut self, item: T) {
        let slot = Slot {
            key: item.ordering_key(),
            insertion: self.inserted,
            item,
        };
        self.inserted += 1;
        self.heap.push(slot);
    }

    /// Remove and return the item with the smallest key
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|slot| slot.item)
    }

    /// Smallest key currently held
    pub fn peek_key(&self) -> Option<u64> {
        self.heap.peek().map(|slot| slot.key)
    }

    /// Whether an item with `key` is held
    pub fn contains_key(&self, key: u64) -> bool {
        self.heap.iter().any(|slot| slot.key == key)
    }

    /// Number of items held
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T: Keyed> Default for ResultOrderingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases items strictly in key order 0, 1, 2, ...
pub struct ReorderBuffer<T: Keyed = TranslationResult> {
    queue: ResultOrderingQueue<T>,
    next_key: u64,
}

impl<T: Keyed> ReorderBuffer<T> {
    /// Create a buffer expecting key 0 first
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a buffer expecting `next_key` first
    pub fn starting_at(next_key: u64) -> Self {
        Self {
            queue: ResultOrderingQueue::new(),
            next_key,
        }
    }

    /// Accept an item; stale keys and keys already held are dropped.
    /// Returns whether the item was kept.
    pub fn push(&mut self, item: T) -> bool {
        let key = item.ordering_key();
        if key < self.next_key || self.queue.contains_key(key) {
            warn!("Dropping result with duplicate ordering key {}", key);
            return false;
        }
        self.queue.push(item);
        true
    }

    /// Take every item that is now next in line
    pub fn drain_ready(&mut self) -> Vec<T> {
        let mut ready = Vec::new();
        while self.queue.peek_key() == Some(self.next_key) {
            if let Some(item) = self.queue.pop() {
                ready.push(item);
                self.next_key += 1;
            }
        }
        ready
    }

    /// Take everything left in key order, gaps included
    pub fn drain_all(&mut self) -> Vec<T> {
        let mut rest = Vec::with_capacity(self.queue.len());
        while let Some(item) = self.queue.pop() {
            self.next_key = item.ordering_key() + 1;
            rest.push(item);
        }
        rest
    }

    /// Key of the next item to be released
    pub fn next_key(&self) -> u64 {
        self.next_key
    }

    /// Number of items waiting for an earlier key
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<T: Keyed> Default for ReorderBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
