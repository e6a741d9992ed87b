use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::slice;
use tracing::instrument;

/// Entry in the value hierarchy.
///
/// Each node exclusively owns its children, so cloning a node (or a forest of them)
/// yields a fully independent copy with no state shared with the source.
/// Cloning and dropping walk the subtree with explicit stacks, so depth is bounded by
/// memory rather than by the call stack.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Identifier, unique across the whole tree
    pub id: String,
    /// Display label
    pub label: String,
    /// Current value; for internal nodes the sum of the children once propagated
    pub value: f64,
    /// Baseline fixed at construction, used for variance
    pub original_value: f64,
    /// Ordered child nodes, empty for leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Leaf whose baseline equals its starting value.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            original_value: value,
            children: Vec::new(),
        }
    }

    /// Internal node whose value and baseline are the sum of its children's values.
    pub fn branch(id: impl Into<String>, label: impl Into<String>, children: Vec<Node>) -> Self {
        let total = children_total(&children);
        Self {
            id: id.into(),
            label: label.into(),
            value: total,
            original_value: total,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of the direct children's current values (0 for a leaf).
    pub fn children_total(&self) -> f64 {
        children_total(&self.children)
    }

    #[instrument(level = "trace", skip(self), fields(id = %self.id))]
    pub fn depth(&self) -> usize {
        PreOrderIter::new(std::slice::from_ref(self))
            .map(|(depth, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        PreOrderIter::new(std::slice::from_ref(self)).count()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

pub(crate) fn children_total(children: &[Node]) -> f64 {
    children.iter().map(|child| child.value).sum()
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            value: self.value,
            original_value: self.original_value,
            children: clone_tree(&self.children),
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Deep, independent copy of a forest.
pub fn clone_tree(roots: &[Node]) -> Vec<Node> {
    // Bottom frame stands for the forest itself and collects the copied roots
    let mut stack = vec![CopyFrame::forest(roots)];

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.pending.next() {
            stack.push(CopyFrame::open(child));
            continue;
        }
        if stack.len() == 1 {
            break;
        }
        if let Some(copied) = stack.pop().and_then(CopyFrame::close) {
            if let Some(parent) = stack.last_mut() {
                parent.done.push(copied);
            }
        }
    }

    stack.pop().map(|forest| forest.done).unwrap_or_default()
}

/// A source node whose children are being copied.
struct CopyFrame<'a> {
    source: Option<&'a Node>,
    pending: slice::Iter<'a, Node>,
    done: Vec<Node>,
}

impl<'a> CopyFrame<'a> {
    fn forest(roots: &'a [Node]) -> Self {
        Self {
            source: None,
            pending: roots.iter(),
            done: Vec::with_capacity(roots.len()),
        }
    }

    fn open(source: &'a Node) -> Self {
        Self {
            source: Some(source),
            pending: source.children.iter(),
            done: Vec::with_capacity(source.children.len()),
        }
    }

    fn close(self) -> Option<Node> {
        let source = self.source?;
        Some(Node {
            id: source.id.clone(),
            label: source.label.clone(),
            value: source.value,
            original_value: source.original_value,
            children: self.done,
        })
    }
}

/// Ordered forest of root nodes, one snapshot of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<Node>,
}

impl Tree {
    /// Wraps the given roots as-is; seed invariants are the caller's responsibility.
    pub fn from_roots(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes across all roots.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(&self.roots)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(&self.roots)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Ids of all leaf nodes in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.id.as_str())
            .collect()
    }
}

impl From<Vec<Node>> for Tree {
    fn from(roots: Vec<Node>) -> Self {
        Self::from_roots(roots)
    }
}

/// Depth-first pre-order traversal over a forest, yielding `(depth, node)`.
///
/// A root and all of its descendants come before the next root.
pub struct PreOrderIter<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> PreOrderIter<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        // Push in reverse order for left-to-right traversal
        let stack = roots.iter().rev().map(|node| (0, node)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// Depth-first post-order traversal: children before their parent.
pub struct PostOrderIter<'a> {
    stack: Vec<(&'a Node, bool)>,
}

impl<'a> PostOrderIter<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        let stack = roots.iter().rev().map(|node| (node, false)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node);
            }
            self.stack.push((node, true));
            for child in node.children.iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
