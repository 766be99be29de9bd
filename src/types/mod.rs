//! Core data types for the allocation engine
//!
//! ## Types
//!
//! - [`Order`]: An order waiting for a picker
//! - [`Picker`]: A picker waiting for an order
//! - [`QueueKind`]: Which of a store's two containers is addressed
//! - [`Allocation`]: One committed order/picker pairing
//! - [`ScoreMeta`]: Diagnostic score breakdown for either entity
//! - [`QueueSize`] / [`QueueStatus`]: Per-store queue views

mod order;
mod picker;
mod allocation;
mod meta;
mod status;

// Re-export all types at module level
pub use order::{Order, QueueKind};
pub use picker::Picker;
pub use allocation::Allocation;
pub use meta::{OrderScoreMeta, PickerScoreMeta, ScoreMeta};
pub use status::{QueueSize, QueueStatus};
