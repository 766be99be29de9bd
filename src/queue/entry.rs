//! Queue entries and their rank ordering.
//!
//! ## Ordering
//!
//! Entries rank by score ascending (lower = higher priority). Equal scores
//! fall back to lexicographic id order, so a container's order never
//! depends on insertion history.
//!
//! Scores compare with [`f64::total_cmp`], which makes the rank key a
//! total order even in the presence of `-0.0`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An entity id paired with its priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub id: String,
    pub score: f64,
}

impl ScoredEntry {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }

    /// Key under which this entry sits in the rank index
    pub(crate) fn rank_key(&self) -> RankKey {
        RankKey {
            score: self.score,
            id: self.id.clone(),
        }
    }
}

/// Rank index key: score first, id second.
#[derive(Debug, Clone)]
pub(crate) struct RankKey {
    pub score: f64,
    pub id: String,
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}
