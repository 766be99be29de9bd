//! Priority containers for the allocation engine.
//!
//! ## Components
//!
//! - [`ScoredEntry`]: An id and its score
//! - [`ScoredQueue`]: One ordered container with at-most-once membership
//! - [`StoreQueues`]: A store's order and picker containers, with the
//!   atomic take-both-minima step
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Upsert | O(log n) |
//! | Remove by id | O(log n) |
//! | Peek minimum | O(log n) |
//! | Size | O(1) |
//! | Take both minima | O(log n) |
//!
//! ## Example
//!
//! ```
//! use pick_allocator::queue::StoreQueues;
//! use pick_allocator::types::QueueKind;
//!
//! let mut store = StoreQueues::new();
//! store.queue_mut(QueueKind::Order).upsert("O1", 0.22);
//! store.queue_mut(QueueKind::Picker).upsert("P1", 0.50);
//!
//! let (order, picker) = store.take_both_minima().unwrap();
//! assert_eq!((order.id.as_str(), picker.id.as_str()), ("O1", "P1"));
//! assert!(store.take_both_minima().is_none());
//! ```

pub mod entry;
pub mod scored;
pub mod store;

pub use entry::ScoredEntry;
pub use scored::ScoredQueue;
pub use store::StoreQueues;
