//! CLI module for toolify - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for listing, showing and
//! submitting tools, and the TUI launch.

pub mod commands;

pub use commands::Cli;
