//! Backing-store contracts for queues and score metadata.
//!
//! The engine depends only on these two traits. A backend that persists
//! to an external store must implement [`QueueBackend::take_both_minima`]
//! as a single server-side step (transaction or script); issuing two
//! separate pops reintroduces the race the engine exists to prevent.
//!
//! [`memory`] provides the in-process implementations.

use std::time::Duration;

use crate::error::BackendError;
use crate::queue::ScoredEntry;
use crate::types::{QueueKind, QueueSize, ScoreMeta};

pub mod memory;

pub use memory::{MemoryMetaBackend, MemoryQueueBackend};

/// Per-store ordered containers with an atomic paired pop.
pub trait QueueBackend: Send + Sync {
    /// Insert `id` into the `kind` container of `store_id`, or replace its score
    fn upsert(
        &self,
        store_id: &str,
        kind: QueueKind,
        id: &str,
        score: f64,
    ) -> Result<(), BackendError>;

    /// Remove `id`; `Ok(false)` if it was not queued
    fn remove(&self, store_id: &str, kind: QueueKind, id: &str) -> Result<bool, BackendError>;

    /// Lowest-scored entry of the container, without removing it
    fn peek_min(&self, store_id: &str, kind: QueueKind)
        -> Result<Option<ScoredEntry>, BackendError>;

    fn size(&self, store_id: &str, kind: QueueKind) -> Result<usize, BackendError>;

    /// Sizes of both containers of `store_id`.
    ///
    /// The default issues two `size` calls; backends that can read both
    /// in one round trip should override it.
    fn sizes(&self, store_id: &str) -> Result<QueueSize, BackendError> {
        Ok(QueueSize::new(
            self.size(store_id, QueueKind::Order)?,
            self.size(store_id, QueueKind::Picker)?,
        ))
    }

    /// Atomically remove the best order and best picker of `store_id`.
    ///
    /// Returns `(order_id, picker_id)`, or None with nothing removed if
    /// either container is empty.
    fn take_both_minima(&self, store_id: &str) -> Result<Option<(String, String)>, BackendError>;
}

/// Keyed metadata storage with expiry.
pub trait MetaBackend: Send + Sync {
    /// Store `meta` under `key`, expiring `ttl` after this call
    fn put(&self, key: &str, meta: ScoreMeta, ttl: Duration) -> Result<(), BackendError>;

    /// Fetch `key`; absent and expired keys both return `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<ScoreMeta>, BackendError>;
}

impl<T: QueueBackend + ?Sized> QueueBackend for std::sync::Arc<T> {
    fn upsert(
        &self,
        store_id: &str,
        kind: QueueKind,
        id: &str,
        score: f64,
    ) -> Result<(), BackendError> {
        (**self).upsert(store_id, kind, id, score)
    }

    fn remove(&self, store_id: &str, kind: QueueKind, id: &str) -> Result<bool, BackendError> {
        (**self).remove(store_id, kind, id)
    }

    fn peek_min(
        &self,
        store_id: &str,
        kind: QueueKind,
    ) -> Result<Option<ScoredEntry>, BackendError> {
        (**self).peek_min(store_id, kind)
    }

    fn size(&self, store_id: &str, kind: QueueKind) -> Result<usize, BackendError> {
        (**self).size(store_id, kind)
    }

    fn sizes(&self, store_id: &str) -> Result<QueueSize, BackendError> {
        (**self).sizes(store_id)
    }

    fn take_both_minima(&self, store_id: &str) -> Result<Option<(String, String)>, BackendError> {
        (**self).take_both_minima(store_id)
    }
}

impl<T: MetaBackend + ?Sized> MetaBackend for std::sync::Arc<T> {
    fn put(&self, key: &str, meta: ScoreMeta, ttl: Duration) -> Result<(), BackendError> {
        (**self).put(key, meta, ttl)
    }

    fn get(&self, key: &str) -> Result<Option<ScoreMeta>, BackendError> {
        (**self).get(key)
    }
}
