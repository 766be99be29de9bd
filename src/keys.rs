//! Score metadata key formats.
//!
//! Orders and pickers get separate namespaces so that an order and a
//! picker sharing an id never collide in a metadata backend.

/// `order:scoremeta:{order_id}`
pub fn order_score_meta(order_id: &str) -> String {
    format!("order:scoremeta:{}", order_id)
}

/// `picker:scoremeta:{picker_id}`
pub fn picker_score_meta(picker_id: &str) -> String {
    format!("picker:scoremeta:{}", picker_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_meta_keys() {
        assert_eq!(order_score_meta("order456"), "order:scoremeta:order456");
        assert_eq!(picker_score_meta("picker789"), "picker:scoremeta:picker789");
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        assert_ne!(order_score_meta("X"), picker_score_meta("X"));
    }
}
