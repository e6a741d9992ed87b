//! Bottom-up subtotal recomputation
//!
//! Restores subtotal consistency across the whole forest in one post-order pass,
//! independent of which node was edited.

use std::mem;
use std::vec;

use tracing::{debug, instrument};

use super::node::{children_total, clone_tree, Node, PostOrderIter};

/// Returns a corrected copy of `roots` where every internal node's value is the sum of
/// its (already corrected) children. Leaves are left untouched.
#[instrument(level = "debug", skip(roots), fields(roots = roots.len()))]
pub fn propagate_subtotals(roots: &[Node]) -> Vec<Node> {
    propagate_owned(clone_tree(roots))
}

/// Owning variant of [`propagate_subtotals`] for a forest the caller already copied.
pub fn propagate_owned(roots: Vec<Node>) -> Vec<Node> {
    // Bottom frame stands for the forest itself and collects the finished roots
    let mut stack = vec![Frame::forest(roots)];

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.pending.next() {
            stack.push(Frame::open(child));
            continue;
        }
        if stack.len() == 1 {
            break;
        }
        if let Some(finished) = stack.pop().and_then(Frame::close) {
            if let Some(parent) = stack.last_mut() {
                parent.done.push(finished);
            }
        }
    }

    stack.pop().map(|forest| forest.done).unwrap_or_default()
}

/// A node whose children are being settled.
struct Frame {
    node: Option<Node>,
    pending: vec::IntoIter<Node>,
    done: Vec<Node>,
}

impl Frame {
    fn forest(roots: Vec<Node>) -> Self {
        let done = Vec::with_capacity(roots.len());
        Self {
            node: None,
            pending: roots.into_iter(),
            done,
        }
    }

    fn open(mut node: Node) -> Self {
        let children = mem::take(&mut node.children);
        let done = Vec::with_capacity(children.len());
        Self {
            node: Some(node),
            pending: children.into_iter(),
            done,
        }
    }

    fn close(self) -> Option<Node> {
        let mut node = self.node?;
        node.children = self.done;
        if !node.children.is_empty() {
            node.value = children_total(&node.children);
        }
        Some(node)
    }
}

/// Ids of internal nodes whose value differs from the sum of their children by more than
/// `tolerance`, in post-order.
#[instrument(level = "debug", skip(roots))]
pub fn check_subtotals(roots: &[Node], tolerance: f64) -> Vec<String> {
    let offenders: Vec<String> = PostOrderIter::new(roots)
        .filter(|node| !node.is_leaf())
        .filter(|node| (node.value - node.children_total()).abs() > tolerance)
        .map(|node| node.id.clone())
        .collect();
    if !offenders.is_empty() {
        debug!(count = offenders.len(), "subtotal inconsistencies");
    }
    offenders
}
