//! Fixed-capacity LIFO stack used while rebuilding a tree dump.

use oxihuff_core::error::{OxiHuffError, Result};

/// A stack that refuses to grow past its capacity.
#[derive(Debug)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an item, failing if the stack is full.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.capacity {
            return Err(OxiHuffError::capacity_exceeded("node stack", self.capacity));
        }
        self.items.push(item);
        Ok(())
    }

    /// Pop the most recently pushed item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Number of items on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
