//! Presentation-neutral view of a snapshot: one row per node plus the grand total

use serde::Serialize;
use tracing::instrument;

use crate::domain::{grand_total, original_grand_total, variance, Tree};

/// Direction of a variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(variance: f64) -> Self {
        if variance > 0.0 {
            Trend::Up
        } else if variance < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// One node of the snapshot with its derived variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub depth: usize,
    pub id: String,
    pub label: String,
    pub value: f64,
    pub original_value: f64,
    pub variance: f64,
    /// True when the value is a subtotal of child rows
    pub subtotal: bool,
}

impl Row {
    pub fn trend(&self) -> Trend {
        Trend::of(self.variance)
    }
}

/// Totals line shown under the rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotal {
    pub value: f64,
    pub original_value: f64,
    pub variance: f64,
}

impl GrandTotal {
    pub fn trend(&self) -> Trend {
        Trend::of(self.variance)
    }
}

/// Rows in pre-order and the grand total, computed on demand from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub rows: Vec<Row>,
    pub grand_total: GrandTotal,
}

impl Report {
    #[instrument(level = "debug", skip(tree))]
    pub fn build(tree: &Tree) -> Self {
        let rows = tree
            .iter()
            .map(|(depth, node)| Row {
                depth,
                id: node.id.clone(),
                label: node.label.clone(),
                value: node.value,
                original_value: node.original_value,
                variance: variance(node.value, node.original_value),
                subtotal: !node.is_leaf(),
            })
            .collect();

        Self {
            rows,
            grand_total: totals(tree),
        }
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Grand total of `tree` against its baseline.
pub fn totals(tree: &Tree) -> GrandTotal {
    let value = grand_total(tree.roots());
    let original_value = original_grand_total(tree.roots());
    GrandTotal {
        value,
        original_value,
        variance: variance(value, original_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Node;

    #[test]
    fn test_report_rows_follow_preorder() {
        let mut tree = Tree::from_roots(vec![Node::branch(
            "a",
            "A",
            vec![Node::leaf("a1", "A1", 10.0), Node::leaf("a2", "A2", 30.0)],
        )]);
        tree.roots_mut()[0].children[0].value = 20.0;

        let report = Report::build(&tree);
        let ids: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "a2"]);
        assert!(report.rows[0].subtotal);
        assert_eq!(report.rows[1].depth, 1);
        assert_eq!(report.row("a1").map(Row::trend), Some(Trend::Up));
        assert_eq!(report.row("a2").map(Row::trend), Some(Trend::Flat));
    }

    #[test]
    fn test_trend_of_zero_is_flat() {
        assert_eq!(Trend::of(0.0), Trend::Flat);
        assert_eq!(Trend::of(-0.01), Trend::Down);
    }
}
