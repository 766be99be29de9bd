//! Ordered container of scored entries.
//!
//! ## Architecture
//!
//! The container uses the same hybrid layout as an order book side:
//!
//! - **Slab**: Pre-allocated storage for O(1) entry insert/remove
//! - **BTreeMap**: Rank index keyed by (score, id) for O(log n) minimum lookup
//! - **HashMap**: Id to slab key mapping for O(1) membership and removal
//!
//! The id index is what enforces at-most-once membership: an upsert of a
//! known id re-ranks the existing slot instead of adding a second one.
//!
//! ## Example
//!
//! ```
//! use pick_allocator::queue::ScoredQueue;
//!
//! let mut queue = ScoredQueue::with_capacity(16);
//! queue.upsert("O1", 0.7);
//! queue.upsert("O2", 0.2);
//!
//! assert_eq!(queue.peek_min().map(|e| e.id.as_str()), Some("O2"));
//! assert_eq!(queue.len(), 2);
//! ```

use std::collections::{BTreeMap, HashMap};

use slab::Slab;

use crate::queue::entry::{RankKey, ScoredEntry};

/// One priority-ordered container (a store's orders or its pickers).
#[derive(Debug, Default)]
pub struct ScoredQueue {
    /// Entry storage
    /// Key: slab index, Value: ScoredEntry
    entries: Slab<ScoredEntry>,

    /// Rank index (sorted by score, then id)
    ranking: BTreeMap<RankKey, usize>,

    /// Entity id to slab key mapping
    index: HashMap<String, usize>,
}

impl ScoredQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Slab::with_capacity(capacity),
            ranking: BTreeMap::new(),
            index: HashMap::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // Entry Management
    // ========================================================================

    /// Insert `id` with `score`, or re-rank it if already present.
    ///
    /// # Returns
    ///
    /// The previous score when an existing entry was replaced
    pub fn upsert(&mut self, id: &str, score: f64) -> Option<f64> {
        if let Some(&key) = self.index.get(id) {
            let entry = &mut self.entries[key];
            let previous = entry.score;

            self.ranking.remove(&entry.rank_key());
            entry.score = score;
            self.ranking.insert(entry.rank_key(), key);

            return Some(previous);
        }

        let entry = ScoredEntry::new(id, score);
        let rank = entry.rank_key();
        let key = self.entries.insert(entry);

        self.ranking.insert(rank, key);
        self.index.insert(id.to_string(), key);
        None
    }

    /// Remove an entry by id
    ///
    /// # Returns
    ///
    /// The removed entry, or None if the id was not queued
    pub fn remove(&mut self, id: &str) -> Option<ScoredEntry> {
        let key = self.index.remove(id)?;
        let entry = self.entries.remove(key);
        self.ranking.remove(&entry.rank_key());
        Some(entry)
    }

    /// The lowest-scored entry, without removing it
    #[inline]
    pub fn peek_min(&self) -> Option<&ScoredEntry> {
        self.ranking.values().next().map(|&key| &self.entries[key])
    }

    /// Remove and return the lowest-scored entry
    pub fn pop_min(&mut self) -> Option<ScoredEntry> {
        let (rank, key) = self.ranking.pop_first()?;
        self.index.remove(&rank.id);
        Some(self.entries.remove(key))
    }

    /// Entries in rank order, best first
    pub fn iter(&self) -> impl Iterator<Item = &ScoredEntry> + '_ {
        self.ranking.values().map(move |&key| &self.entries[key])
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
