//! Allocation engine module.
//!
//! ## Design Principles
//!
//! 1. **Atomic pairing**: An order and a picker leave their queues together
//!    or not at all
//! 2. **Per-store isolation**: Stores never contend with each other
//! 3. **Synchronous execution**: No async in the hot path; a call either
//!    completes its critical section or never enters it
//! 4. **Explicit time**: `now` comes from a [`Clock`], never from the scorer
//!
//! ## Matching Rules
//!
//! - The lowest-scored order is paired with the lowest-scored picker
//! - Equal scores fall back to lexicographic id order
//! - Allocation is event-triggered; there is no background loop
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use pick_allocator::config::AllocationConfig;
//! use pick_allocator::engine::AllocationEngine;
//! use pick_allocator::types::{Order, Picker};
//!
//! let engine = AllocationEngine::in_memory(&AllocationConfig::default());
//!
//! engine.enqueue_order(&Order::new("O1", "S", Utc::now(), 1, 10)).unwrap();
//! engine.enqueue_picker(&Picker::new("P1", "S", 500, 50)).unwrap();
//!
//! let allocation = engine.allocate("S").unwrap().unwrap();
//! assert_eq!(allocation.order_id, "O1");
//! assert_eq!(allocation.picker_id, "P1");
//! assert!(engine.allocate("S").unwrap().is_none());
//! ```

pub mod clock;
pub mod coordinator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use coordinator::AllocationEngine;
