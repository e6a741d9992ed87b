//! Tests for one-level distribution and percentage allocation

use alloctree::domain::{allocate_by_percentage, distribute, Node};
use rstest::{fixture, rstest};

fn parent_of(values: &[f64]) -> Node {
    let children = values
        .iter()
        .enumerate()
        .map(|(i, v)| Node::leaf(format!("c{i}"), format!("Child {i}"), *v))
        .collect();
    Node::branch("p", "Parent", children)
}

fn child_values(node: &Node) -> Vec<f64> {
    node.children.iter().map(|c| c.value).collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "expected {expected:?}, got {actual:?}");
    }
}

// root
// ├── mid (10)
// │   ├── g1 (4)
// │   └── g2 (6)
// └── other (30)
#[fixture]
fn nested() -> Node {
    Node::branch(
        "root",
        "Root",
        vec![
            Node::branch(
                "mid",
                "Mid",
                vec![Node::leaf("g1", "G1", 4.0), Node::leaf("g2", "G2", 6.0)],
            ),
            Node::leaf("other", "Other", 30.0),
        ],
    )
}

// ============================================================
// Proportional split
// ============================================================

#[test]
fn given_children_10_30_60_when_distributing_200_then_shares_scale() {
    let node = parent_of(&[10.0, 30.0, 60.0]);

    let updated = distribute(&node, 200.0);

    assert_close(&child_values(&updated), &[20.0, 60.0, 120.0]);
    assert_eq!(updated.value, 200.0);
}

#[test]
fn given_uneven_split_when_distributing_then_shares_rounded_to_four_places() {
    let node = parent_of(&[1.0, 1.0, 1.0]);

    let updated = distribute(&node, 100.0);

    assert_eq!(child_values(&updated), vec![33.3333, 33.3333, 33.3333]);
    // Node keeps the requested value, not the sum of rounded shares
    assert_eq!(updated.value, 100.0);
}

#[rstest]
#[case(&[10.0, 30.0, 60.0], 200.0)]
#[case(&[1.0, 2.0], 7.0)]
#[case(&[3.0, 3.0, 3.0, 1.0], -12.5)]
#[case(&[0.5, 1e6], 0.001)]
fn given_nonzero_total_when_distributing_then_children_sum_to_target(
    #[case] values: &[f64],
    #[case] target: f64,
) {
    let updated = distribute(&parent_of(values), target);

    let sum: f64 = child_values(&updated).iter().sum();
    let tolerance = 1e-4 * values.len() as f64;
    assert!(
        (sum - target).abs() <= tolerance,
        "sum {sum} differs from {target} by more than {tolerance}"
    );
}

// ============================================================
// Equal split
// ============================================================

#[test]
fn given_three_zero_children_when_distributing_90_then_each_gets_30() {
    let node = parent_of(&[0.0, 0.0, 0.0]);

    let updated = distribute(&node, 90.0);

    assert_eq!(child_values(&updated), vec![30.0, 30.0, 30.0]);
}

#[test]
fn given_children_cancelling_to_zero_when_distributing_then_split_equally() {
    let node = parent_of(&[5.0, -5.0]);

    let updated = distribute(&node, 10.0);

    assert_eq!(child_values(&updated), vec![5.0, 5.0]);
}

#[rstest]
#[case(0.0)]
#[case(42.0)]
fn given_single_child_when_distributing_then_child_receives_everything(#[case] start: f64) {
    let node = parent_of(&[start]);

    let updated = distribute(&node, 17.5);

    assert_eq!(child_values(&updated), vec![17.5]);
}

// ============================================================
// Scope of a distribution step
// ============================================================

#[rstest]
fn given_nested_node_when_distributing_then_grandchildren_untouched(nested: Node) {
    let updated = distribute(&nested, 80.0);

    // mid had 10 of 40, other 30 of 40
    assert_eq!(updated.children[0].value, 20.0);
    assert_eq!(updated.children[1].value, 60.0);
    // mid now disagrees with its own children until propagation
    assert_eq!(child_values(&updated.children[0]), vec![4.0, 6.0]);
}

#[rstest]
fn given_node_when_distributing_then_input_and_baselines_unchanged(nested: Node) {
    let before = nested.clone();

    let updated = distribute(&nested, 1000.0);

    assert_eq!(nested, before);
    assert_eq!(updated.original_value, 40.0);
    assert_eq!(updated.children[0].original_value, 10.0);
    assert_eq!(updated.id, "root");
    assert_eq!(updated.label, "Root");
}

#[test]
fn given_leaf_when_distributing_then_only_value_changes() {
    let leaf = Node::leaf("x", "X", 12.0);

    let updated = distribute(&leaf, -3.0);

    assert_eq!(updated.value, -3.0);
    assert!(updated.is_leaf());
}

// ============================================================
// Percentage allocation
// ============================================================

#[test]
fn given_leaf_50_when_allocating_10_percent_then_same_as_distributing_55() {
    let leaf = Node::leaf("x", "X", 50.0);

    assert_eq!(allocate_by_percentage(&leaf, 10.0), distribute(&leaf, 55.0));
}

#[test]
fn given_parent_50_when_allocating_10_percent_then_same_as_distributing_55() {
    let node = parent_of(&[20.0, 30.0]);

    let by_percentage = allocate_by_percentage(&node, 10.0);

    assert_eq!(by_percentage, distribute(&node, 55.0));
    assert_close(&child_values(&by_percentage), &[22.0, 33.0]);
}

#[rstest]
#[case(100.0, -10.0, 90.0)]
#[case(100.0, -100.0, 0.0)]
#[case(100.0, -250.0, -150.0)]
#[case(-40.0, 50.0, -60.0)]
#[case(0.0, 25.0, 0.0)]
fn given_percentage_when_allocating_then_no_floor_applied(
    #[case] start: f64,
    #[case] percentage: f64,
    #[case] expected: f64,
) {
    let leaf = Node::leaf("x", "X", start);

    let updated = allocate_by_percentage(&leaf, percentage);

    assert!((updated.value - expected).abs() < 1e-9);
}
