//! Priority score calculator.
//!
//! Every term is normalized into `[0, 1]` before weighting, so with weights
//! summing to 1 the score itself lies in `[0, 1]`. The calculator never
//! reads the wall clock; `now` is always an argument.

use chrono::{DateTime, Utc};

use crate::config::ScoringConfig;
use crate::types::{Order, OrderScoreMeta, Picker, PickerScoreMeta};

/// Map `value` from `[min, max]` onto `[0, 1]`, clamping out-of-range input.
///
/// A collapsed range (`max == min`) yields the neutral `0.5`.
///
/// ```
/// use pick_allocator::scoring::normalize;
///
/// assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
/// assert_eq!(normalize(20.0, 0.0, 10.0), 1.0);
/// assert_eq!(normalize(3.0, 7.0, 7.0), 0.5);
/// ```
#[inline]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    let normalized = (value - min) / (max - min);
    normalized.clamp(0.0, 1.0)
}

/// Pure scorer for orders and pickers. Lower score = higher priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score an order as of `now`.
    ///
    /// Orders that have waited longer past their OAT, carry a more urgent
    /// priority, or have fewer SKUs score lower.
    pub fn score_order(&self, order: &Order, now: DateTime<Utc>) -> (f64, OrderScoreMeta) {
        let weights = &self.config.weights.order;
        let limits = &self.config.limits;

        let oat_delta_minutes = (now - order.optimal_allocation_time).num_minutes();

        // Negated so a longer wait maps to a lower term
        let norm_oat = normalize(
            -(oat_delta_minutes as f64),
            -limits.max_oat_minutes,
            limits.max_oat_minutes,
        );
        let norm_priority = normalize(order.priority_order as f64, 1.0, limits.max_priority);
        let norm_sku = normalize(order.sku_count as f64, 1.0, limits.max_sku);

        let score = weights.oat_delta * norm_oat
            + weights.priority * norm_priority
            + weights.sku_count * norm_sku;

        let meta = OrderScoreMeta {
            oat_delta_minutes,
            priority: order.priority_order,
            sku_count: order.sku_count,
            final_score: score,
        };
        (score, meta)
    }

    /// Score a picker. More lifetime SKUs and orders give a lower score.
    pub fn score_picker(&self, picker: &Picker) -> (f64, PickerScoreMeta) {
        let weights = &self.config.weights.picker;
        let limits = &self.config.limits;

        let norm_sku_done =
            1.0 - normalize(picker.sku_completed as f64, 0.0, limits.max_sku_completed);
        let norm_order_done =
            1.0 - normalize(picker.order_completed as f64, 0.0, limits.max_order_completed);

        let score = weights.sku_completed * norm_sku_done
            + weights.order_completed * norm_order_done;

        let meta = PickerScoreMeta {
            sku_completed: picker.sku_completed,
            order_completed: picker.order_completed,
            final_score: score,
        };
        (score, meta)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const EPSILON: f64 = 1e-4;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn order(priority: u32, skus: u32, oat: DateTime<Utc>) -> Order {
        Order::new("O", "S", oat, priority, skus)
    }

    #[test]
    fn test_normalize_bounds() {
        assert_eq!(normalize(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(15.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn test_normalize_collapsed_range() {
        assert_eq!(normalize(0.0, 0.0, 0.0), 0.5);
        assert_eq!(normalize(1e9, 1.0, 1.0), 0.5);
    }

    #[test]
    fn test_high_priority_worked_example() {
        let calc = ScoreCalculator::default();
        let (score, meta) = calc.score_order(&order(1, 10, now()), now());

        // 0.4*0.5 + 0.35*0 + 0.25*(9/99)
        assert!((score - 0.2227).abs() < EPSILON, "score = {}", score);
        assert_eq!(meta.oat_delta_minutes, 0);
        assert_eq!(meta.final_score, score);
    }

    #[test]
    fn test_low_priority_worked_example() {
        let calc = ScoreCalculator::default();
        let (score, _) = calc.score_order(&order(10, 10, now()), now());

        assert!((score - 0.5727).abs() < EPSILON, "score = {}", score);
    }

    #[test]
    fn test_higher_priority_order_scores_lower() {
        let calc = ScoreCalculator::default();
        let (high, _) = calc.score_order(&order(1, 10, now()), now());
        let (low, _) = calc.score_order(&order(10, 10, now()), now());

        assert!(high < low);
    }

    #[test]
    fn test_older_order_scores_lower() {
        let calc = ScoreCalculator::default();
        let (older, _) = calc.score_order(&order(5, 10, now() - Duration::hours(1)), now());
        let (newer, _) = calc.score_order(&order(5, 10, now()), now());

        assert!(older < newer);
    }

    #[test]
    fn test_fewer_skus_score_lower() {
        let calc = ScoreCalculator::default();
        let (few, _) = calc.score_order(&order(5, 5, now()), now());
        let (many, _) = calc.score_order(&order(5, 50, now()), now());

        assert!(few < many);
    }

    #[test]
    fn test_oat_delta_is_truncated_minutes() {
        let calc = ScoreCalculator::default();

        let (_, past) = calc.score_order(&order(3, 15, now() - Duration::seconds(330)), now());
        assert_eq!(past.oat_delta_minutes, 5);

        let (_, future) = calc.score_order(&order(3, 15, now() + Duration::seconds(330)), now());
        assert_eq!(future.oat_delta_minutes, -5);
    }

    #[test]
    fn test_oat_term_clamps_beyond_window() {
        let calc = ScoreCalculator::default();
        let (long_wait, _) = calc.score_order(&order(1, 1, now() - Duration::hours(10)), now());
        let (far_future, _) = calc.score_order(&order(1, 1, now() + Duration::hours(10)), now());

        assert!(long_wait.abs() < EPSILON);
        assert!((far_future - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_order_meta_records_inputs() {
        let calc = ScoreCalculator::default();
        let (_, meta) = calc.score_order(&order(3, 15, now() - Duration::minutes(5)), now());

        assert_eq!(meta.priority, 3);
        assert_eq!(meta.sku_count, 15);
        assert!(meta.oat_delta_minutes > 0);
    }

    #[test]
    fn test_experienced_picker_scores_lower() {
        let calc = ScoreCalculator::default();
        let (experienced, _) = calc.score_picker(&Picker::new("P1", "S", 5000, 500));
        let (novice, _) = calc.score_picker(&Picker::new("P2", "S", 100, 10));

        assert!(experienced < novice);
    }

    #[test]
    fn test_picker_score_extremes() {
        let calc = ScoreCalculator::default();
        let (fresh, _) = calc.score_picker(&Picker::new("P1", "S", 0, 0));
        let (veteran, _) = calc.score_picker(&Picker::new("P2", "S", 50_000, 5_000));

        assert!((fresh - 1.0).abs() < EPSILON);
        assert!(veteran.abs() < EPSILON);
    }

    #[test]
    fn test_picker_meta_records_inputs() {
        let calc = ScoreCalculator::default();
        let (score, meta) = calc.score_picker(&Picker::new("P1", "S", 1000, 100));

        assert_eq!(meta.sku_completed, 1000);
        assert_eq!(meta.order_completed, 100);
        assert_eq!(meta.final_score, score);
    }

    #[test]
    fn test_collapsed_limits_stay_finite() {
        let mut config = ScoringConfig::default();
        config.limits.max_oat_minutes = 0.0;
        config.limits.max_priority = 1.0;
        config.limits.max_sku_completed = 0.0;
        let calc = ScoreCalculator::new(config);

        let (order_score, _) = calc.score_order(&order(4, 10, now()), now());
        let (picker_score, _) = calc.score_picker(&Picker::new("P1", "S", 10, 10));

        assert!(order_score.is_finite());
        assert!(picker_score.is_finite());
        // Collapsed OAT and priority ranges contribute 0.5 each
        let expected = 0.4 * 0.5 + 0.35 * 0.5 + 0.25 * (9.0 / 99.0);
        assert!((order_score - expected).abs() < EPSILON);
    }

    #[test]
    fn test_weights_scale_scores_consistently() {
        let mut doubled = ScoringConfig::default();
        doubled.weights.order.oat_delta *= 2.0;
        doubled.weights.order.priority *= 2.0;
        doubled.weights.order.sku_count *= 2.0;

        let base = ScoreCalculator::default();
        let scaled = ScoreCalculator::new(doubled);
        let o = order(4, 20, now() - Duration::minutes(30));

        let (a, _) = base.score_order(&o, now());
        let (b, _) = scaled.score_order(&o, now());
        assert!((b - 2.0 * a).abs() < EPSILON);
    }
}
