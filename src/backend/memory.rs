//! In-process backends.
//!
//! ## Locking
//!
//! [`MemoryQueueBackend`] keeps one `Mutex<StoreQueues>` per store in a
//! `DashMap` arena. Every queue operation on a store runs under that
//! store's mutex, so `take_both_minima` is one critical section and can
//! never interleave with another operation on the same store. The arena
//! shard lock is only held long enough to clone the store's `Arc`;
//! different stores never wait on each other's mutex.
//!
//! Stores are created lazily on the first write and never destroyed.
//! Reads against an unknown store report an empty container without
//! creating it.
//!
//! ## Expiry
//!
//! [`MemoryMetaBackend`] expires entries passively: `get` treats an entry
//! past its deadline as absent and evicts it. [`MemoryMetaBackend::purge_expired`]
//! sweeps the whole map when the caller wants memory back.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::backend::{MetaBackend, QueueBackend};
use crate::error::BackendError;
use crate::queue::{ScoredEntry, StoreQueues};
use crate::types::{QueueKind, QueueSize, ScoreMeta};

type SharedStore = Arc<Mutex<StoreQueues>>;

// ============================================================================
// Queue backend
// ============================================================================

/// Per-store priority containers held in process memory.
#[derive(Debug, Default)]
pub struct MemoryQueueBackend {
    stores: DashMap<String, SharedStore>,
}

impl MemoryQueueBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stores that have received at least one write
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Copy of a container's entries in rank order
    pub fn snapshot(&self, store_id: &str, kind: QueueKind) -> Vec<ScoredEntry> {
        self.with_store(store_id, |store| store.queue(kind).iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Run `f` under the store's lock; None if the store was never written
    fn with_store<R>(&self, store_id: &str, f: impl FnOnce(&mut StoreQueues) -> R) -> Option<R> {
        let store = self.existing(store_id)?;
        let mut guard = store.lock();
        Some(f(&mut *guard))
    }

    fn existing(&self, store_id: &str) -> Option<SharedStore> {
        self.stores.get(store_id).map(|store| Arc::clone(store.value()))
    }

    fn store(&self, store_id: &str) -> SharedStore {
        if let Some(store) = self.existing(store_id) {
            return store;
        }
        Arc::clone(self.stores.entry(store_id.to_string()).or_default().value())
    }
}

impl QueueBackend for MemoryQueueBackend {
    fn upsert(
        &self,
        store_id: &str,
        kind: QueueKind,
        id: &str,
        score: f64,
    ) -> Result<(), BackendError> {
        let store = self.store(store_id);
        store.lock().queue_mut(kind).upsert(id, score);
        Ok(())
    }

    fn remove(&self, store_id: &str, kind: QueueKind, id: &str) -> Result<bool, BackendError> {
        Ok(self
            .with_store(store_id, |store| store.queue_mut(kind).remove(id).is_some())
            .unwrap_or(false))
    }

    fn peek_min(
        &self,
        store_id: &str,
        kind: QueueKind,
    ) -> Result<Option<ScoredEntry>, BackendError> {
        Ok(self
            .with_store(store_id, |store| store.queue(kind).peek_min().cloned())
            .flatten())
    }

    fn size(&self, store_id: &str, kind: QueueKind) -> Result<usize, BackendError> {
        Ok(self
            .with_store(store_id, |store| store.queue(kind).len())
            .unwrap_or(0))
    }

    /// Both sizes under one lock acquisition
    fn sizes(&self, store_id: &str) -> Result<QueueSize, BackendError> {
        Ok(self
            .with_store(store_id, |store| store.size())
            .unwrap_or_default())
    }

    fn take_both_minima(&self, store_id: &str) -> Result<Option<(String, String)>, BackendError> {
        let taken = self
            .with_store(store_id, StoreQueues::take_both_minima)
            .flatten();
        Ok(taken.map(|(order, picker)| (order.id, picker.id)))
    }
}

// ============================================================================
// Metadata backend
// ============================================================================

#[derive(Debug, Clone)]
struct CachedMeta {
    meta: ScoreMeta,
    /// None when the TTL is too large to represent
    expires_at: Option<Instant>,
}

impl CachedMeta {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Score metadata held in process memory with passive expiry.
#[derive(Debug, Default)]
pub struct MemoryMetaBackend {
    entries: DashMap<String, CachedMeta>,
}

impl MemoryMetaBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries currently held, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }
}

impl MetaBackend for MemoryMetaBackend {
    fn put(&self, key: &str, meta: ScoreMeta, ttl: Duration) -> Result<(), BackendError> {
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .insert(key.to_string(), CachedMeta { meta, expires_at });
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<ScoreMeta>, BackendError> {
        let now = Instant::now();

        // Guard must be released before evicting from the same shard
        let live = match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired(now) => Some(entry.meta),
            Some(_) => None,
        };
        if live.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(live)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
