//! Computed table for memoizing BDD operations.
//!
//! Backed by a [HashMap], so there are no collisions and entries are only
//! dropped by [`Cache::clear`].

use std::collections::HashMap;
use std::hash::Hash;

use crate::reference::Ref;

/// Normalized key of a memoized operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OpKey {
    Ite(Ref, Ref, Ref),
}

pub struct Cache<K, V> {
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Cache<K, V> {
    /// Create a cache pre-sized for `2^bits` entries.
    pub fn new(bits: usize) -> Self {
        Self {
            map: HashMap::with_capacity(1 << bits.min(20)),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}
