//! Loading the initial tree from a seed file
//!
//! Seeds are JSON or TOML documents describing the forest:
//!
//! ```json
//! [{ "id": "sales", "label": "Sales", "value": 0, "children": [
//!     { "id": "north", "label": "North", "value": 120 } ] }]
//! ```
//!
//! ```toml
//! [[roots]]
//! id = "sales"
//! label = "Sales"
//! value = 0
//!
//! [[roots.children]]
//! id = "north"
//! label = "North"
//! value = 120
//! ```
//!
//! `originalValue` defaults to `value`. The tree is taken as given: subtotals and id
//! uniqueness are not checked here.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{Node, Tree};

/// Seed document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Toml,
}

impl SeedFormat {
    /// Picks the format from the file extension; anything but `.toml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SeedFormat::Toml,
            _ => SeedFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedId {
    Text(String),
    Number(i64),
}

impl From<SeedId> for String {
    fn from(id: SeedId) -> Self {
        match id {
            SeedId::Text(text) => text,
            SeedId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedNode {
    id: SeedId,
    label: String,
    value: f64,
    original_value: Option<f64>,
    #[serde(default)]
    children: Vec<SeedNode>,
}

impl From<SeedNode> for Node {
    fn from(seed: SeedNode) -> Self {
        Node {
            id: seed.id.into(),
            label: seed.label,
            value: seed.value,
            original_value: seed.original_value.unwrap_or(seed.value),
            children: seed.children.into_iter().map(Node::from).collect(),
        }
    }
}

/// `{ "roots": [...] }` form; the only form TOML can express.
#[derive(Debug, Deserialize)]
struct SeedDocument {
    roots: Vec<SeedNode>,
}

fn into_tree(roots: Vec<SeedNode>) -> Tree {
    Tree::from_roots(roots.into_iter().map(Node::from).collect())
}

/// Parses seed `text` in the given `format`.
///
/// JSON may be a bare array of roots or a `{ "roots": [...] }` object; the first token
/// decides which, so errors point at the offending field.
pub fn parse_seed(text: &str, format: SeedFormat) -> Result<Tree, String> {
    let roots = match format {
        SeedFormat::Json if text.trim_start().starts_with('{') => {
            serde_json::from_str::<SeedDocument>(text)
                .map_err(|e| e.to_string())?
                .roots
        }
        SeedFormat::Json => {
            serde_json::from_str::<Vec<SeedNode>>(text).map_err(|e| e.to_string())?
        }
        SeedFormat::Toml => {
            toml::from_str::<SeedDocument>(text)
                .map_err(|e| e.to_string())?
                .roots
        }
    };
    Ok(into_tree(roots))
}

/// Reads and parses the seed file at `path`.
#[instrument(level = "debug")]
pub fn load_seed(path: &Path) -> ApplicationResult<Tree> {
    let seed_err = |message: String| ApplicationError::Seed {
        path: path.to_path_buf(),
        message,
    };

    let text = fs::read_to_string(path).map_err(|e| seed_err(e.to_string()))?;
    let tree = parse_seed(&text, SeedFormat::from_path(path)).map_err(seed_err)?;
    debug!(roots = tree.roots().len(), nodes = tree.len(), "seed loaded");
    Ok(tree)
}
