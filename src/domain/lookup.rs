//! Node lookup by identifier
//!
//! All searches walk the forest depth-first in pre-order with an explicit stack, so the
//! first match is deterministic even when ids are duplicated.

use tracing::{instrument, trace};

use super::error::{DomainError, DomainResult};
use super::node::{Node, PreOrderIter};

/// First node in pre-order whose id equals `id`.
#[instrument(level = "debug", skip(roots))]
pub fn find_by_id<'a>(roots: &'a [Node], id: &str) -> Option<&'a Node> {
    let found = PreOrderIter::new(roots)
        .map(|(_, node)| node)
        .find(|node| node.id == id);
    trace!(found = found.is_some());
    found
}

/// Mutable counterpart of [`find_by_id`], same traversal order.
#[instrument(level = "debug", skip(roots))]
pub fn find_by_id_mut<'a>(roots: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    let mut stack: Vec<&'a mut Node> = roots.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter_mut().rev());
    }
    None
}

/// Immediate parent of the first node in pre-order whose id equals `child_id`.
///
/// Returns `None` when `child_id` is a root or not present at all.
#[instrument(level = "debug", skip(roots))]
pub fn find_parent_by_id<'a>(roots: &'a [Node], child_id: &str) -> Option<&'a Node> {
    PreOrderIter::new(roots)
        .map(|(_, node)| node)
        .find(|node| node.children.iter().any(|child| child.id == child_id))
}

/// [`find_by_id`] that reports a miss as [`DomainError::NotFound`].
pub fn require<'a>(roots: &'a [Node], id: &str) -> DomainResult<&'a Node> {
    find_by_id(roots, id).ok_or_else(|| DomainError::NotFound(id.to_string()))
}

/// [`find_parent_by_id`] that distinguishes an absent id from a root.
pub fn require_parent<'a>(roots: &'a [Node], child_id: &str) -> DomainResult<&'a Node> {
    match find_parent_by_id(roots, child_id) {
        Some(parent) => Ok(parent),
        None if find_by_id(roots, child_id).is_some() => {
            Err(DomainError::NoParent(child_id.to_string()))
        }
        None => Err(DomainError::NotFound(child_id.to_string())),
    }
}
