//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: search and filter the directory
//! - show: print one tool
//! - submit: submit a tool without the TUI
//!
//! With no subcommand the TUI is launched.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolify - explore and share community tools
#[derive(Parser, Debug)]
#[command(name = "toolify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tools, optionally filtered
    List {
        /// Case-insensitive text to find in name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Restrict to a category (all, software, plugin, script)
        #[arg(short = 't', long = "type", default_value = "all")]
        category: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single tool
    Show {
        /// Tool ID
        id: String,
    },

    /// Submit a new tool
    Submit {
        /// Tool name
        #[arg(long, default_value = "")]
        name: String,

        /// What the tool does
        #[arg(long, default_value = "")]
        description: String,

        /// Link to the tool
        #[arg(long, default_value = "")]
        link: String,

        /// software, plugin or script
        #[arg(short = 't', long = "type", default_value = "")]
        category: String,

        /// Optional icon URL
        #[arg(long)]
        icon: Option<String>,
    },
}
