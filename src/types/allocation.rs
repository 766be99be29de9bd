//! Allocation type representing one committed order/picker pairing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The immutable result of one successful match.
///
/// Exactly one order and one picker of the same store are consumed to
/// produce an allocation; neither id will appear in another allocation
/// unless it is enqueued again.
///
/// ## Example
///
/// ```
/// use chrono::Utc;
/// use pick_allocator::types::Allocation;
///
/// let allocation = Allocation::new("O1", "P1", "S1", Utc::now());
/// assert_eq!(allocation.order_id, "O1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The consumed order
    pub order_id: String,

    /// The consumed picker
    pub picker_id: String,

    /// Store both entities were queued in
    pub store_id: String,

    /// When the match was committed
    pub matched_at: DateTime<Utc>,
}

impl Allocation {
    /// Create a new allocation
    pub fn new(
        order_id: impl Into<String>,
        picker_id: impl Into<String>,
        store_id: impl Into<String>,
        matched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            picker_id: picker_id.into(),
            store_id: store_id.into(),
            matched_at,
        }
    }

    /// Match time as Unix milliseconds
    pub fn timestamp_millis(&self) -> i64 {
        self.matched_at.timestamp_millis()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
