//! Typed score-metadata cache over a [`MetaBackend`].
//!
//! Orders and pickers live in separate key namespaces, so an order and a
//! picker sharing an id never overwrite each other's breakdown.

use std::time::Duration;

use crate::backend::MetaBackend;
use crate::error::BackendError;
use crate::keys;
use crate::types::{OrderScoreMeta, PickerScoreMeta, ScoreMeta};

/// Score breakdowns keyed by entity id, kept for a fixed TTL.
#[derive(Debug)]
pub struct ScoreMetaCache<M> {
    backend: M,
    ttl: Duration,
}

impl<M: MetaBackend> ScoreMetaCache<M> {
    pub fn new(backend: M, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn backend(&self) -> &M {
        &self.backend
    }

    pub fn put_order(&self, order_id: &str, meta: OrderScoreMeta) -> Result<(), BackendError> {
        self.backend
            .put(&keys::order_score_meta(order_id), meta.into(), self.ttl)
    }

    pub fn put_picker(&self, picker_id: &str, meta: PickerScoreMeta) -> Result<(), BackendError> {
        self.backend
            .put(&keys::picker_score_meta(picker_id), meta.into(), self.ttl)
    }

    /// Breakdown recorded at the order's last enqueue, if not yet expired
    pub fn order_meta(&self, order_id: &str) -> Result<Option<OrderScoreMeta>, BackendError> {
        Ok(self
            .backend
            .get(&keys::order_score_meta(order_id))?
            .and_then(ScoreMeta::into_order))
    }

    /// Breakdown recorded at the picker's last enqueue, if not yet expired
    pub fn picker_meta(&self, picker_id: &str) -> Result<Option<PickerScoreMeta>, BackendError> {
        Ok(self
            .backend
            .get(&keys::picker_score_meta(picker_id))?
            .and_then(ScoreMeta::into_picker))
    }
}
