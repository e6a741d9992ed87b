//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Hierarchical value allocation: distribute changes across a tree, keep subtotals and variance consistent
#[derive(Parser, Debug)]
#[command(name = "alloctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Seed file with the initial tree (JSON or TOML; default: `seed` from config)
    #[arg(short, long, global = true, env = "ALLOCTREE_SEED", value_hint = ValueHint::FilePath)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tree with values and variance
    Show {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show grand totals and variance
    Totals,

    /// Look up a node by id
    Find {
        /// Node id
        id: String,
    },

    /// Look up the parent of a node
    Parent {
        /// Child node id
        id: String,
    },

    /// Set a node to a value and redistribute it to its children
    Set {
        /// Node id
        id: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Print the resulting tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a node by a percentage of its current value
    Adjust {
        /// Node id
        id: String,
        /// Percentage, may be negative (e.g. -5 or 12.5%)
        #[arg(allow_hyphen_values = true)]
        percent: String,
        /// Print the resulting tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a file of updates (`set <id> <value>` / `adjust <id> <percent>`, one per line)
    Apply {
        /// Update file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Print the resulting tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report nodes whose value is not the sum of their children
    Check {
        /// Allowed absolute difference
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,

    /// Print a config template
    Init,
}
