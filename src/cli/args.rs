//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// AVL tree teaching tool: insert keys, watch rotations, double-click to delete
#[derive(Parser, Debug)]
#[command(name = "avlviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "AVLVIZ_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert keys in order and draw the resulting tree
    Show {
        /// Keys to insert
        #[arg(allow_negative_numbers = true)]
        keys: Vec<String>,
        /// Keys to delete afterwards
        #[arg(short = 'x', long = "delete", allow_negative_numbers = true)]
        delete: Vec<String>,
        /// Print the snapshot as JSON instead of a diagram
        #[arg(long)]
        json: bool,
    },

    /// Insert keys one at a time, drawing the tree after each step
    Trace {
        /// Keys to insert
        #[arg(required = true, allow_negative_numbers = true)]
        keys: Vec<String>,
    },

    /// Build a tree and verify ordering, balance and heights
    Check {
        /// Keys to insert
        #[arg(allow_negative_numbers = true)]
        keys: Vec<String>,
    },

    /// Interactive session: insert, click to delete, show
    Repl,

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
    /// Print the effective configuration
    Show,
    /// Print the global config file location
    Path,
    /// Print a commented config template
    Template,
}
