//! Score breakdown records kept for diagnostics.
//!
//! These carry no matching weight. They exist so operators can see why an
//! order or picker sits where it does in its queue.

use serde::{Deserialize, Serialize};

/// Breakdown of an order's score at the time it was enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderScoreMeta {
    /// Whole minutes elapsed since the OAT (negative if the OAT is ahead)
    pub oat_delta_minutes: i64,
    /// Business priority as submitted
    pub priority: u32,
    /// SKU count as submitted
    pub sku_count: u32,
    /// The score the order was queued with
    pub final_score: f64,
}

/// Breakdown of a picker's score at the time it was enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerScoreMeta {
    pub sku_completed: u64,
    pub order_completed: u64,
    /// The score the picker was queued with
    pub final_score: f64,
}

/// Either breakdown, as held by a metadata backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScoreMeta {
    Order(OrderScoreMeta),
    Picker(PickerScoreMeta),
}

impl ScoreMeta {
    pub fn into_order(self) -> Option<OrderScoreMeta> {
        match self {
            ScoreMeta::Order(meta) => Some(meta),
            ScoreMeta::Picker(_) => None,
        }
    }

    pub fn into_picker(self) -> Option<PickerScoreMeta> {
        match self {
            ScoreMeta::Picker(meta) => Some(meta),
            ScoreMeta::Order(_) => None,
        }
    }
}

impl From<OrderScoreMeta> for ScoreMeta {
    fn from(meta: OrderScoreMeta) -> Self {
        ScoreMeta::Order(meta)
    }
}

impl From<PickerScoreMeta> for ScoreMeta {
    fn from(meta: PickerScoreMeta) -> Self {
        ScoreMeta::Picker(meta)
    }
}
