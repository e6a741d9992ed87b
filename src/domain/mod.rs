//! Domain layer: the node model and the recalculation algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! Every operation takes a tree by reference and returns a new owned value.

pub mod aggregate;
pub mod distribution;
pub mod error;
pub mod lookup;
pub mod node;
pub mod propagation;

pub use aggregate::{grand_total, original_grand_total, variance};
pub use distribution::{allocate_by_percentage, distribute, round_share};
pub use error::{DomainError, DomainResult};
pub use lookup::{find_by_id, find_by_id_mut, find_parent_by_id, require, require_parent};
pub use node::{clone_tree, Node, PostOrderIter, PreOrderIter, Tree};
pub use propagation::{check_subtotals, propagate_owned, propagate_subtotals};
