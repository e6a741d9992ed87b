//! Update engine: clone, locate, distribute, propagate
//!
//! Every update works on a private copy of the input snapshot and returns a new one.
//! The input tree is never modified, so earlier snapshots stay valid.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::input::{parse_amount, parse_percentage};
use crate::domain::{
    allocate_by_percentage, clone_tree, distribute, find_by_id_mut, propagate_owned, DomainError,
    DomainResult, Node, Tree,
};

/// Sets node `id` to `value`, redistributes it to the node's children and returns the
/// propagated snapshot.
#[instrument(level = "debug", skip(tree))]
pub fn set_value(tree: &Tree, id: &str, value: f64) -> DomainResult<Tree> {
    apply_to_node(tree, id, |node| distribute(node, value))
}

/// Scales node `id` by `percentage` of its current value, then behaves like [`set_value`].
#[instrument(level = "debug", skip(tree))]
pub fn adjust_by_percentage(tree: &Tree, id: &str, percentage: f64) -> DomainResult<Tree> {
    apply_to_node(tree, id, |node| allocate_by_percentage(node, percentage))
}

fn apply_to_node<F>(tree: &Tree, id: &str, allocate: F) -> DomainResult<Tree>
where
    F: FnOnce(&Node) -> Node,
{
    let mut roots = clone_tree(tree.roots());
    let node = find_by_id_mut(&mut roots, id).ok_or_else(|| DomainError::NotFound(id.into()))?;
    let before = node.value;
    *node = allocate(node);
    debug!(id, before, after = node.value, "distributed");

    Ok(Tree::from_roots(propagate_owned(roots)))
}

/// A single requested change to the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Set the node to an absolute value
    SetValue { id: String, value: f64 },
    /// Change the node by a percentage of its current value
    AdjustPercent { id: String, percentage: f64 },
}

impl Update {
    pub fn id(&self) -> &str {
        match self {
            Update::SetValue { id, .. } | Update::AdjustPercent { id, .. } => id,
        }
    }

    /// Applies this update to `tree`, returning the new snapshot.
    pub fn apply(&self, tree: &Tree) -> DomainResult<Tree> {
        match self {
            Update::SetValue { id, value } => set_value(tree, id, *value),
            Update::AdjustPercent { id, percentage } => adjust_by_percentage(tree, id, *percentage),
        }
    }

    /// Parses a batch of updates, one per line. Blank lines and `#` comments are skipped.
    pub fn parse_batch(text: &str) -> ApplicationResult<Vec<Update>> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::parse::<Update>)
            .collect()
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::SetValue { id, value } => write!(f, "set {id} {value}"),
            Update::AdjustPercent { id, percentage } => write!(f, "adjust {id} {percentage}"),
        }
    }
}

/// Parses `set <id> <value>` or `adjust <id> <percent>`; a trailing `%` is allowed.
impl FromStr for Update {
    type Err = ApplicationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ApplicationError::InvalidUpdate {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [verb, id, amount] = parts.as_slice() else {
            return Err(invalid("expected: <set|adjust> <id> <number>"));
        };

        match *verb {
            "set" => Ok(Update::SetValue {
                id: id.to_string(),
                value: parse_amount(amount)?,
            }),
            "adjust" => Ok(Update::AdjustPercent {
                id: id.to_string(),
                percentage: parse_percentage(amount)?,
            }),
            other => Err(invalid(&format!("unknown operation '{other}'"))),
        }
    }
}

/// Holder of the current tree snapshot.
///
/// The current tree is replaced in a single assignment once an update has fully
/// completed; a failed update leaves it untouched.
#[derive(Debug, Clone)]
pub struct Workbook {
    seed: Tree,
    current: Tree,
}

impl Workbook {
    pub fn new(seed: Tree) -> Self {
        Self {
            current: seed.clone(),
            seed,
        }
    }

    /// Snapshot the workbook started from.
    pub fn seed(&self) -> &Tree {
        &self.seed
    }

    pub fn current(&self) -> &Tree {
        &self.current
    }

    pub fn into_current(self) -> Tree {
        self.current
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, update: &Update) -> DomainResult<&Tree> {
        match update.apply(&self.current) {
            Ok(next) => {
                info!(%update, "applied");
                self.current = next;
                Ok(&self.current)
            }
            Err(e) => {
                warn!(%update, error = %e, "update skipped");
                Err(e)
            }
        }
    }

    /// Applies `updates` in order, skipping the ones that fail.
    ///
    /// Returns the errors of the skipped updates, in order.
    pub fn apply_all<'u, I>(&mut self, updates: I) -> Vec<(Update, DomainError)>
    where
        I: IntoIterator<Item = &'u Update>,
    {
        updates
            .into_iter()
            .filter_map(|update| {
                self.apply(update)
                    .err()
                    .map(|error| (update.clone(), error))
            })
            .collect()
    }
}
