//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Query hierarchies whose structure comes from parent names: ancestors, descendants, subtrees
#[derive(Parser, Debug)]
#[command(name = "gentree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show hierarchy as tree
    Tree {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only show the subtree rooted at this entry
        #[arg(long)]
        from: Option<String>,
    },

    /// List ancestors of an entry, root first
    Parents {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry name
        node: String,
    },

    /// List direct children of an entry
    Children {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry name
        node: String,
    },

    /// List all descendants of an entry in pre-order
    Younger {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry name
        node: String,
    },

    /// Show ancestors shared by several entries
    Common {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry names
        #[arg(required = true, num_args = 1..)]
        nodes: Vec<String>,
    },

    /// Show the minimal tree spanning entries and their ancestors
    Local {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry names
        #[arg(required = true, num_args = 1..)]
        nodes: Vec<String>,
    },

    /// Show all branches linearly, leaf first
    Branches {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List leaf entries
    Leaves {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Check that a hierarchy file forms a valid tree
    Validate {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
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
    /// Show effective settings
    Show {
        /// Directory to look for a local .gentree.toml
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Print a config template
    Template,
}
