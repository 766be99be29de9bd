//! Priority scoring for orders and pickers.
//!
//! ## Order score
//!
//! ```text
//! score = w.oat_delta * norm(-minutes_since_oat, -MAX_OAT, MAX_OAT)
//!       + w.priority  * norm(priority_order, 1, MAX_PRIORITY)
//!       + w.sku_count * norm(sku_count, 1, MAX_SKU)
//! ```
//!
//! ## Picker score
//!
//! ```text
//! score = w.sku_completed   * (1 - norm(sku_completed, 0, MAX_SKU_COMPLETED))
//!       + w.order_completed * (1 - norm(order_completed, 0, MAX_ORDER_COMPLETED))
//! ```
//!
//! Lower always means matched sooner.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use pick_allocator::scoring::ScoreCalculator;
//! use pick_allocator::types::Order;
//!
//! let calc = ScoreCalculator::default();
//! let now = Utc::now();
//!
//! let urgent = Order::new("O1", "S1", now, 1, 10);
//! let relaxed = Order::new("O2", "S1", now, 10, 10);
//!
//! let (a, _) = calc.score_order(&urgent, now);
//! let (b, _) = calc.score_order(&relaxed, now);
//! assert!(a < b);
//! ```

pub mod calculator;

pub use calculator::{normalize, ScoreCalculator};
