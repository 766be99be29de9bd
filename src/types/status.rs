//! Per-store queue views.

use serde::{Deserialize, Serialize};

use crate::types::{OrderScoreMeta, PickerScoreMeta};

/// Sizes of a store's two containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSize {
    pub orders: usize,
    pub pickers: usize,
}

impl QueueSize {
    pub fn new(orders: usize, pickers: usize) -> Self {
        Self { orders, pickers }
    }

    /// Both containers hold at least one entry
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.orders > 0 && self.pickers > 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders == 0 && self.pickers == 0
    }
}

/// Diagnostic snapshot of one store.
///
/// Fields are read independently; the snapshot is not atomic and may be
/// stale by the time it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub store_id: String,
    pub size: QueueSize,
    pub can_allocate: bool,
    pub top_order_id: Option<String>,
    pub top_picker_id: Option<String>,
    pub top_order_meta: Option<OrderScoreMeta>,
    pub top_picker_meta: Option<PickerScoreMeta>,
}
