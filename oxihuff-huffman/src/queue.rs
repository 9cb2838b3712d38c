//! Fixed-capacity min-priority queue with FIFO tie-breaking.
//!
//! Entries are kept sorted from highest to lowest priority key, so the
//! minimum always sits at the end of the vector and extraction is a pop.
//! The key is `(weight, sequence)`, where `sequence` is a counter stamped
//! at insertion time; equal weights therefore leave in insertion order.
//! With at most 256 entries the linear shift on insert is cheaper than a
//! heap and keeps the ordering exact.

use oxihuff_core::error::{OxiHuffError, Result};

/// Something with a weight that the queue orders by.
pub trait Weighted {
    /// The ordering weight; lower weights are extracted first.
    fn weight(&self) -> u64;
}

#[derive(Debug)]
struct Slot<T> {
    weight: u64,
    sequence: u64,
    item: T,
}

impl<T> Slot<T> {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.sequence)
    }
}

/// A bounded queue that always yields its lowest-weight entry first.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    /// Sorted by descending key; the minimum is last.
    slots: Vec<Slot<T>>,
    capacity: usize,
    next_sequence: u64,
}

impl<T: Weighted> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Insert an entry.
    ///
    /// Fails with a capacity error if the queue is already full.
    pub fn insert(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            return Err(OxiHuffError::capacity_exceeded(
                "priority queue",
                self.capacity,
            ));
        }

        let slot = Slot {
            weight: item.weight(),
            sequence: self.next_sequence,
            item,
        };
        self.next_sequence += 1;

        let key = slot.key();
        let index = self.slots.partition_point(|s| s.key() > key);
        self.slots.insert(index, slot);
        Ok(())
    }

    /// Remove and return the entry with the lowest weight.
    ///
    /// Among equal weights, the earliest inserted entry is returned.
    pub fn extract_min(&mut self) -> Result<T> {
        self.slots
            .pop()
            .map(|slot| slot.item)
            .ok_or_else(|| OxiHuffError::underflow("priority queue"))
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
