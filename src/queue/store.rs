//! The pair of containers belonging to one store.

use crate::queue::{ScoredEntry, ScoredQueue};
use crate::types::{QueueKind, QueueSize};

/// A store's order and picker containers.
///
/// Callers that share a `StoreQueues` across threads must guard the whole
/// value with one lock; [`StoreQueues::take_both_minima`] is only atomic
/// with respect to holders of that same lock.
#[derive(Debug, Default)]
pub struct StoreQueues {
    orders: ScoredQueue,
    pickers: ScoredQueue,
}

impl StoreQueues {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn queue(&self, kind: QueueKind) -> &ScoredQueue {
        match kind {
            QueueKind::Order => &self.orders,
            QueueKind::Picker => &self.pickers,
        }
    }

    #[inline]
    pub fn queue_mut(&mut self, kind: QueueKind) -> &mut ScoredQueue {
        match kind {
            QueueKind::Order => &mut self.orders,
            QueueKind::Picker => &mut self.pickers,
        }
    }

    pub fn size(&self) -> QueueSize {
        QueueSize::new(self.orders.len(), self.pickers.len())
    }

    /// Both containers are non-empty
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.orders.is_empty() && !self.pickers.is_empty()
    }

    /// Remove the best order and the best picker together.
    ///
    /// Returns None and leaves both containers untouched if either is empty.
    pub fn take_both_minima(&mut self) -> Option<(ScoredEntry, ScoredEntry)> {
        if !self.is_ready() {
            return None;
        }
        self.orders.pop_min().zip(self.pickers.pop_min())
    }
}
