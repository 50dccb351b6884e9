//! Domain types for Toolify
//!
//! - Tool: a directory entry (id, name, description, icon, link, category, owner)
//! - Category: software, plugin or script
//! - NewTool: a validated submission awaiting an id from the backend
//! - seed: the built-in six-tool mock set

pub mod seed;
pub mod tool;

pub use seed::mock_tools;
pub use tool::{Category, IconDisplay, NewTool, Tool};
