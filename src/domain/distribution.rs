//! Pushing a new value onto a node and reallocating it across its direct children
//!
//! Distribution reaches one level down only. Grandchildren keep their values, so the
//! redistributed children can disagree with their own subtotals until propagation runs.

use tracing::{debug, instrument};

use super::node::Node;

/// Decimal places kept for proportional shares.
pub const SHARE_DECIMALS: i32 = 4;

/// Rounds a proportional share to [`SHARE_DECIMALS`] places, halves away from zero.
pub fn round_share(value: f64) -> f64 {
    let scale = 10f64.powi(SHARE_DECIMALS);
    (value * scale).round() / scale
}

/// Sets `node` to `new_value` and reallocates that value across its direct children.
///
/// - Leaf: only the value changes.
/// - Children summing to zero: every child receives an equal share.
/// - Otherwise: every child keeps its proportion of the current total, rounded to
///   [`SHARE_DECIMALS`] places.
///
/// The node's own value is `new_value`, not the sum of the rounded shares.
#[instrument(level = "debug", skip(node), fields(id = %node.id))]
pub fn distribute(node: &Node, new_value: f64) -> Node {
    let mut updated = node.clone();
    updated.value = new_value;

    if updated.is_leaf() {
        return updated;
    }

    let current_total = node.children_total();
    if current_total == 0.0 {
        let share = new_value / updated.children.len() as f64;
        debug!(share, children = updated.children.len(), "equal split");
        for child in &mut updated.children {
            child.value = share;
        }
    } else {
        debug!(current_total, "proportional split");
        for child in &mut updated.children {
            child.value = round_share(child.value / current_total * new_value);
        }
    }

    updated
}

/// Scales `node` by `percentage` (which may be negative) and distributes the result.
///
/// The target is `value * (1 + percentage / 100)`; no floor is applied.
#[instrument(level = "debug", skip(node), fields(id = %node.id))]
pub fn allocate_by_percentage(node: &Node, percentage: f64) -> Node {
    let new_value = node.value + node.value * percentage / 100.0;
    distribute(node, new_value)
}
