//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Structural queries over a serialized binary tree
///
/// Trees are given in pre-order form with `null` for absent children,
/// e.g. '[1,2,null,null,3,null,null]'. Use `-` to read the tree from stdin.
/// Nodes are addressed by their 0-based pre-order position.
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Result format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shortest root-to-leaf path length in nodes
    MinDepth {
        /// Serialized tree or `-` for stdin
        tree: String,
    },

    /// Longest root-to-leaf path length in nodes
    MaxDepth {
        /// Serialized tree or `-` for stdin
        tree: String,
    },

    /// Largest sum along any path, floored at 0
    MaxSum {
        /// Serialized tree or `-` for stdin
        tree: String,
    },

    /// Smallest value strictly greater than BOUND
    NextLarger {
        /// Serialized tree or `-` for stdin
        tree: String,
        #[arg(allow_negative_numbers = true)]
        bound: i64,
    },

    /// Whether two nodes are on the same level with different parents
    Cousins {
        /// Serialized tree or `-` for stdin
        tree: String,
        /// Pre-order position of the first node
        a: usize,
        /// Pre-order position of the second node
        b: usize,
    },

    /// Lowest common ancestor of two nodes
    Lca {
        /// Serialized tree or `-` for stdin
        tree: String,
        /// Pre-order position of the first node
        a: usize,
        /// Pre-order position of the second node
        b: usize,
    },

    /// Render the tree
    Show {
        /// Serialized tree or `-` for stdin
        tree: String,
    },

    /// Re-serialize to canonical form
    Normalize {
        /// Serialized tree or `-` for stdin
        tree: String,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Print a commented template config
    Template,
}
