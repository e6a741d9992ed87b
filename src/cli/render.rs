//! Tree view of a snapshot for the terminal

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::application::{totals, GrandTotal};
use crate::cli::output;
use crate::config::DisplayConfig;
use crate::domain::{variance, Node, Tree};

pub trait ToTermTree {
    fn to_term_tree(&self, display: &DisplayConfig) -> TermTree<String>;
}

impl ToTermTree for Node {
    fn to_term_tree(&self, display: &DisplayConfig) -> TermTree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|child| child.to_term_tree(display))
            .collect();

        TermTree::new(node_line(self, display)).with_leaves(leaves)
    }
}

// The forest hangs under a synthetic grand-total root
impl ToTermTree for Tree {
    #[instrument(level = "debug", skip_all)]
    fn to_term_tree(&self, display: &DisplayConfig) -> TermTree<String> {
        let leaves: Vec<_> = self
            .roots()
            .iter()
            .map(|root| root.to_term_tree(display))
            .collect();

        TermTree::new(total_line(&totals(self), display)).with_leaves(leaves)
    }
}

/// `Label [id]  value  (was original)  variance`
pub fn node_line(node: &Node, display: &DisplayConfig) -> String {
    let decimals = display.decimals;
    let mut line = format!(
        "{} [{}]  {}",
        node.label,
        node.id,
        output::amount(node.value, decimals)
    );
    if display.show_original {
        line.push_str(&format!(
            "  (was {})",
            output::amount(node.original_value, decimals)
        ));
    }
    line.push_str(&format!(
        "  {}",
        output::variance(variance(node.value, node.original_value), decimals)
    ));
    line
}

pub fn total_line(total: &GrandTotal, display: &DisplayConfig) -> String {
    let decimals = display.decimals;
    let mut line = format!("Grand Total  {}", output::amount(total.value, decimals));
    if display.show_original {
        line.push_str(&format!(
            "  (was {})",
            output::amount(total.original_value, decimals)
        ));
    }
    line.push_str(&format!("  {}", output::variance(total.variance, decimals)));
    line
}
