//! # Pick Allocator
//!
//! Matches waiting warehouse orders to available pickers, one pair at a
//! time, per store.
//!
//! ## Architecture
//!
//! The allocator consists of:
//! - **Types**: Core data structures (Order, Picker, Allocation, ScoreMeta)
//! - **Scoring**: Pure score calculator, lower score = higher priority
//! - **Queue**: Per-store ranked containers with slab-based storage
//! - **Backend**: Queue and metadata storage contracts, plus in-memory implementations
//! - **Engine**: Allocation coordinator and clock
//! - **Ingress**: Request validation and response shapes
//!
//! ## Design Principles
//!
//! 1. **Atomicity**: An order and a picker are consumed together or not at all
//! 2. **Determinism**: Equal scores are ordered by id, never by arrival
//! 3. **Per-store locking**: Stores never contend with each other
//! 4. **Synchronous Execution**: No async in hot path

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Picker, Allocation, score breakdowns
pub mod types;

/// Configuration: weights, limits, TTL and the TOML/env loader
pub mod config;

/// Error types
pub mod error;

/// Score calculator
pub mod scoring;

/// Ranked containers: slab storage with a BTreeMap rank index
pub mod queue;

/// Storage key layout
pub mod keys;

/// Queue and metadata backends
pub mod backend;

/// Score metadata cache
pub mod cache;

/// Allocation engine: coordinator and clock
pub mod engine;

/// Ingress boundary: requests, validation, responses
pub mod ingress;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{AllocationConfig, ConfigLoader};
pub use engine::{AllocationEngine, Clock, FixedClock, SystemClock};
pub use error::{AllocationError, BackendError};
pub use types::{Allocation, Order, Picker, QueueKind, QueueSize, QueueStatus};
