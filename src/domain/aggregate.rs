//! Grand totals and variance

use super::node::Node;

/// Sum of the roots' current values.
///
/// Only roots count: once propagated, each root already carries its subtree total.
pub fn grand_total(roots: &[Node]) -> f64 {
    roots.iter().map(|root| root.value).sum()
}

/// Sum of the roots' baseline values.
pub fn original_grand_total(roots: &[Node]) -> f64 {
    roots.iter().map(|root| root.original_value).sum()
}

/// Percentage change from `original` to `current`.
///
/// A zero baseline yields 0 when `current` is also zero and 100 otherwise.
/// An unchanged value always yields positive zero, whatever the baseline's sign.
pub fn variance(current: f64, original: f64) -> f64 {
    if current == original {
        return 0.0;
    }
    if original == 0.0 {
        return 100.0;
    }
    (current - original) / original * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_negative_baseline_keeps_sign_of_formula() {
        assert_eq!(variance(-50.0, -100.0), -50.0);
    }

    #[test]
    fn test_unchanged_negative_baseline_is_positive_zero() {
        let v = variance(-100.0, -100.0);
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn test_zero_baseline_negative_current() {
        assert_eq!(variance(-5.0, 0.0), 100.0);
    }

    #[test]
    fn test_totals_use_roots_only() {
        let roots = vec![
            Node::branch("a", "A", vec![Node::leaf("a1", "A1", 4.0)]),
            Node::leaf("b", "B", 6.0),
        ];
        assert_eq!(grand_total(&roots), 10.0);
        assert_eq!(original_grand_total(&roots), 10.0);
        assert_eq!(grand_total(&[]), 0.0);
    }
}
