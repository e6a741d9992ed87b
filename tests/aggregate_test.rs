//! Tests for grand totals and variance

use alloctree::application::{set_value, totals, Report, Trend};
use alloctree::domain::{grand_total, original_grand_total, variance, Node, Tree};
use rstest::rstest;

#[rstest]
#[case(0.0, 0.0, 0.0)]
#[case(5.0, 0.0, 100.0)]
#[case(50.0, 100.0, -50.0)]
#[case(150.0, 100.0, 50.0)]
#[case(100.0, 100.0, 0.0)]
#[case(0.0, 80.0, -100.0)]
#[case(-100.0, -100.0, 0.0)]
#[case(-50.0, -100.0, -50.0)]
fn given_pair_when_computing_variance_then_matches(
    #[case] current: f64,
    #[case] original: f64,
    #[case] expected: f64,
) {
    assert!((variance(current, original) - expected).abs() < 1e-12);
}

#[test]
fn given_two_roots_when_one_subtree_changes_then_grand_total_follows() {
    let tree = Tree::from_roots(vec![
        Node::branch(
            "a",
            "A",
            vec![Node::leaf("a1", "A1", 40.0), Node::leaf("a2", "A2", 60.0)],
        ),
        Node::leaf("b", "B", 200.0),
    ]);
    assert_eq!(grand_total(tree.roots()), 300.0);

    let next = set_value(&tree, "a", 150.0).expect("a exists");

    assert_eq!(grand_total(next.roots()), 350.0);
    assert_eq!(original_grand_total(next.roots()), 300.0);
    let grand_variance = variance(grand_total(next.roots()), original_grand_total(next.roots()));
    assert!((grand_variance - 16.666_666_666_666_668).abs() < 1e-9);
}

#[test]
fn given_updated_tree_when_building_report_then_rows_carry_node_variance() {
    let tree = Tree::from_roots(vec![Node::branch(
        "a",
        "A",
        vec![Node::leaf("a1", "A1", 50.0), Node::leaf("a2", "A2", 50.0)],
    )]);
    let next = set_value(&tree, "a1", 25.0).expect("a1 exists");

    let report = Report::build(&next);

    let a1 = report.row("a1").expect("row present");
    assert_eq!(a1.variance, -50.0);
    assert_eq!(a1.trend(), Trend::Down);
    let a = report.row("a").expect("row present");
    assert_eq!(a.value, 75.0);
    assert_eq!(a.variance, -25.0);
    assert_eq!(report.grand_total, totals(&next));
    assert_eq!(report.grand_total.trend(), Trend::Down);
}

#[test]
fn given_empty_tree_when_totalling_then_zero_and_flat() {
    let total = totals(&Tree::default());
    assert_eq!(total.value, 0.0);
    assert_eq!(total.variance, 0.0);
    assert_eq!(total.trend(), Trend::Flat);
}

#[test]
fn given_unchanged_negative_value_when_reporting_then_variance_is_positive_zero() {
    let tree = Tree::from_roots(vec![Node::leaf("refund", "Refund", -100.0)]);

    let report = Report::build(&tree);

    let row = report.row("refund").expect("row present");
    assert!(row.variance == 0.0 && row.variance.is_sign_positive());
    assert_eq!(row.trend(), Trend::Flat);
    let json = serde_json::to_string(&report).expect("serializable");
    assert!(json.contains("\"variance\":0.0"), "{json}");
    assert!(!json.contains("-0.0"), "{json}");
}
