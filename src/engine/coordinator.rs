//! Allocation coordinator: the single entry point every trigger calls.
//!
//! ## Flow
//!
//! ```text
//! enqueue_order / enqueue_picker
//!     -> ScoreCalculator (score + breakdown)
//!     -> QueueBackend::upsert
//!     -> ScoreMetaCache::put_*          (best effort)
//!
//! allocate(store)
//!     -> can_allocate?                  (cheap, may be stale)
//!     -> QueueBackend::take_both_minima (atomic, source of truth)
//!     -> Allocation { order, picker, store, now }
//! ```
//!
//! There is no in-progress state to recover: an allocation either
//! committed inside `take_both_minima` or nothing changed.

use tracing::{debug, info, warn};

use crate::backend::{MemoryMetaBackend, MemoryQueueBackend, MetaBackend, QueueBackend};
use crate::cache::ScoreMetaCache;
use crate::config::AllocationConfig;
use crate::engine::{Clock, SystemClock};
use crate::error::Result;
use crate::queue::ScoredEntry;
use crate::scoring::ScoreCalculator;
use crate::types::{
    Allocation, Order, OrderScoreMeta, Picker, PickerScoreMeta, QueueKind, QueueSize, QueueStatus,
};

/// Matches the best waiting order with the best waiting picker, per store.
///
/// The engine is `Sync` when its backends and clock are, and is meant to
/// be shared behind an `Arc` by any number of request handlers.
#[derive(Debug)]
pub struct AllocationEngine<Q, M, C = SystemClock> {
    queues: Q,
    meta: ScoreMetaCache<M>,
    calculator: ScoreCalculator,
    clock: C,
}

impl AllocationEngine<MemoryQueueBackend, MemoryMetaBackend, SystemClock> {
    /// Engine over the in-process backends and the wall clock
    pub fn in_memory(config: &AllocationConfig) -> Self {
        Self::new(
            config,
            MemoryQueueBackend::new(),
            MemoryMetaBackend::new(),
            SystemClock,
        )
    }
}

impl<Q: QueueBackend, M: MetaBackend, C: Clock> AllocationEngine<Q, M, C> {
    pub fn new(config: &AllocationConfig, queues: Q, meta: M, clock: C) -> Self {
        Self {
            queues,
            meta: ScoreMetaCache::new(meta, config.score_meta_ttl()),
            calculator: ScoreCalculator::new(config.scoring),
            clock,
        }
    }

    pub fn queues(&self) -> &Q {
        &self.queues
    }

    pub fn meta_cache(&self) -> &ScoreMetaCache<M> {
        &self.meta
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ========================================================================
    // Enqueue / Dequeue
    // ========================================================================

    /// Score `order` and place it in its store's order queue.
    ///
    /// An order already queued under the same id is re-scored in place.
    ///
    /// # Returns
    ///
    /// The score the order was queued with
    pub fn enqueue_order(&self, order: &Order) -> Result<f64> {
        let (score, meta) = self.calculator.score_order(order, self.clock.now());

        self.queues
            .upsert(&order.store_id, QueueKind::Order, &order.order_id, score)?;

        if let Err(e) = self.meta.put_order(&order.order_id, meta) {
            warn!(order_id = %order.order_id, error = %e, "Failed to store order score metadata");
        }

        info!(
            order_id = %order.order_id,
            store_id = %order.store_id,
            score,
            "Order enqueued"
        );
        Ok(score)
    }

    /// Score `picker` and place it in its store's picker queue.
    pub fn enqueue_picker(&self, picker: &Picker) -> Result<f64> {
        let (score, meta) = self.calculator.score_picker(picker);

        self.queues
            .upsert(&picker.store_id, QueueKind::Picker, &picker.picker_id, score)?;

        if let Err(e) = self.meta.put_picker(&picker.picker_id, meta) {
            warn!(
                picker_id = %picker.picker_id,
                error = %e,
                "Failed to store picker score metadata"
            );
        }

        info!(
            picker_id = %picker.picker_id,
            store_id = %picker.store_id,
            score,
            "Picker enqueued"
        );
        Ok(score)
    }

    /// Remove an order; `Ok(false)` if it was not queued
    pub fn dequeue_order(&self, store_id: &str, order_id: &str) -> Result<bool> {
        let removed = self.queues.remove(store_id, QueueKind::Order, order_id)?;
        info!(order_id, store_id, removed, "Order dequeued");
        Ok(removed)
    }

    /// Remove a picker; `Ok(false)` if it was not queued
    pub fn dequeue_picker(&self, store_id: &str, picker_id: &str) -> Result<bool> {
        let removed = self.queues.remove(store_id, QueueKind::Picker, picker_id)?;
        info!(picker_id, store_id, removed, "Picker dequeued");
        Ok(removed)
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Both queues of `store_id` are non-empty.
    ///
    /// Advisory only: the answer may be stale by the time `allocate` runs.
    pub fn can_allocate(&self, store_id: &str) -> Result<bool> {
        Ok(self.queues.sizes(store_id)?.is_ready())
    }

    /// Match the best order with the best picker of `store_id`.
    ///
    /// Returns `Ok(None)` without side effects when either queue is empty,
    /// including when a concurrent caller drained it after the pre-check.
    pub fn allocate(&self, store_id: &str) -> Result<Option<Allocation>> {
        if !self.can_allocate(store_id)? {
            debug!(store_id, "Cannot allocate - queues not ready");
            return Ok(None);
        }

        let Some((order_id, picker_id)) = self.queues.take_both_minima(store_id)? else {
            debug!(store_id, "No allocation possible - queues drained concurrently");
            return Ok(None);
        };

        let allocation = Allocation::new(order_id, picker_id, store_id, self.clock.now());
        info!(
            order_id = %allocation.order_id,
            picker_id = %allocation.picker_id,
            store_id,
            "Allocated order to picker"
        );
        Ok(Some(allocation))
    }

    /// Manual allocation trigger for a store
    pub fn trigger(&self, store_id: &str) -> Result<Option<Allocation>> {
        debug!(store_id, "Manual allocation trigger");
        self.allocate(store_id)
    }

    /// Enqueue an order, then attempt an allocation in its store
    pub fn submit_order(&self, order: &Order) -> Result<Option<Allocation>> {
        self.enqueue_order(order)?;
        self.allocate(&order.store_id)
    }

    /// Enqueue a picker, then attempt an allocation in its store
    pub fn submit_picker(&self, picker: &Picker) -> Result<Option<Allocation>> {
        self.enqueue_picker(picker)?;
        self.allocate(&picker.store_id)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub fn order_score_meta(&self, order_id: &str) -> Result<Option<OrderScoreMeta>> {
        Ok(self.meta.order_meta(order_id)?)
    }

    pub fn picker_score_meta(&self, picker_id: &str) -> Result<Option<PickerScoreMeta>> {
        Ok(self.meta.picker_meta(picker_id)?)
    }

    pub fn queue_size(&self, store_id: &str) -> Result<QueueSize> {
        Ok(self.queues.sizes(store_id)?)
    }

    pub fn peek_top_order(&self, store_id: &str) -> Result<Option<ScoredEntry>> {
        Ok(self.queues.peek_min(store_id, QueueKind::Order)?)
    }

    pub fn peek_top_picker(&self, store_id: &str) -> Result<Option<ScoredEntry>> {
        Ok(self.queues.peek_min(store_id, QueueKind::Picker)?)
    }

    /// Sizes, heads and head metadata of a store's queues
    pub fn queue_status(&self, store_id: &str) -> Result<QueueStatus> {
        let size = self.queue_size(store_id)?;
        let top_order_id = self.peek_top_order(store_id)?.map(|e| e.id);
        let top_picker_id = self.peek_top_picker(store_id)?.map(|e| e.id);

        let top_order_meta = match &top_order_id {
            Some(id) => self.order_score_meta(id)?,
            None => None,
        };
        let top_picker_meta = match &top_picker_id {
            Some(id) => self.picker_score_meta(id)?,
            None => None,
        };

        Ok(QueueStatus {
            store_id: store_id.to_string(),
            size,
            can_allocate: size.is_ready(),
            top_order_id,
            top_picker_id,
            top_order_meta,
            top_picker_meta,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
