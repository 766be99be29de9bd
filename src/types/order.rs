//! Order types for the allocation engine.
//!
//! An [`Order`] is a snapshot delivered by the ingress boundary. It is
//! scored once per enqueue; re-enqueueing the same `order_id` overwrites
//! the previous score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// QueueKind enum
// ============================================================================

/// Which of a store's two containers an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    /// Orders waiting for a picker
    Order,
    /// Pickers waiting for an order
    Picker,
}

// ============================================================================
// Order struct
// ============================================================================

/// An order waiting to be picked.
///
/// ## Example
///
/// ```
/// use chrono::Utc;
/// use pick_allocator::types::Order;
///
/// let order = Order::new("O1", "S1", Utc::now(), 1, 10);
/// assert_eq!(order.priority_order, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Caller-assigned unique identifier
    pub order_id: String,

    /// Store whose queues this order joins
    pub store_id: String,

    /// Optimal Allocation Time: when picking should ideally have started
    pub optimal_allocation_time: DateTime<Utc>,

    /// Business priority, 1 is the most urgent
    pub priority_order: u32,

    /// Number of SKUs to pick, at least 1
    pub sku_count: u32,
}

impl Order {
    /// Create a new order snapshot
    ///
    /// # Arguments
    ///
    /// * `order_id` - Unique order identifier
    /// * `store_id` - Store identifier
    /// * `optimal_allocation_time` - Target allocation instant (OAT)
    /// * `priority_order` - Business priority (lower = more urgent)
    /// * `sku_count` - Number of items to pick
    pub fn new(
        order_id: impl Into<String>,
        store_id: impl Into<String>,
        optimal_allocation_time: DateTime<Utc>,
        priority_order: u32,
        sku_count: u32,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            store_id: store_id.into(),
            optimal_allocation_time,
            priority_order,
            sku_count,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
