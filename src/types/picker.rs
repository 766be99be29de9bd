//! Picker snapshot type.

use serde::{Deserialize, Serialize};

/// A picker available for work in a store.
///
/// Lifetime counters drive the picker's score: more experience means a
/// lower score, so experienced pickers are matched first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picker {
    /// Caller-assigned unique identifier
    pub picker_id: String,

    /// Store the picker works in
    pub store_id: String,

    /// Lifetime count of SKUs picked
    pub sku_completed: u64,

    /// Lifetime count of orders completed
    pub order_completed: u64,
}

impl Picker {
    /// Create a new picker snapshot
    pub fn new(
        picker_id: impl Into<String>,
        store_id: impl Into<String>,
        sku_completed: u64,
        order_completed: u64,
    ) -> Self {
        Self {
            picker_id: picker_id.into(),
            store_id: store_id.into(),
            sku_completed,
            order_completed,
        }
    }
}
