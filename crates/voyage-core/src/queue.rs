//! # Priority Container
//!
//! Ordered multi-map from priority to a FIFO queue of values. Extraction
//! always yields a value with the smallest priority; values sharing a
//! priority come out in insertion order.
//!
//! ## Invariant
//!
//! A priority key is present in the map if and only if its queue is
//! non-empty. `dequeue_min` removes a key as soon as its queue drains, so
//! `is_empty()` can answer from the map alone.
//!
//! Both operations are O(log P), where P is the number of distinct
//! priorities currently stored.

use std::collections::{BTreeMap, VecDeque};

use crate::error::EmptyContainerError;

/// Min-priority container with FIFO tie-breaking.
#[derive(Debug, Clone)]
pub struct PriorityContainer<P, V> {
    buckets: BTreeMap<P, VecDeque<V>>,
    len: usize,
}

impl<P: Ord, V> PriorityContainer<P, V> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }

    /// Insert `value` under `priority`, behind any values already queued at
    /// that priority.
    pub fn enqueue(&mut self, priority: P, value: V) {
        self.buckets.entry(priority).or_default().push_back(value);
        self.len += 1;
    }

    /// Remove and return the oldest value with the smallest priority.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyContainerError`] if the container holds no values.
    pub fn dequeue_min(&mut self) -> Result<V, EmptyContainerError> {
        let mut bucket = self.buckets.first_entry().ok_or(EmptyContainerError)?;
        let value = bucket.get_mut().pop_front().ok_or(EmptyContainerError)?;
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.len -= 1;
        Ok(value)
    }

    /// Smallest priority currently stored.
    pub fn peek_priority(&self) -> Option<&P> {
        self.buckets.keys().next()
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of values across all priorities.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl<P: Ord, V> Default for PriorityContainer<P, V> {
    fn default() -> Self {
        Self::new()
    }
}
