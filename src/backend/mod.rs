//! Backend collaborators for the directory.
//!
//! The directory core only talks to two async seams:
//! - `ToolSource`: delivers the tool batch
//! - `ToolSink`: accepts a validated submission
//!
//! `MockBackend` implements both with fixed delays and an in-memory list,
//! optionally seeded from a JSON catalogue file.

mod catalog;
mod mock;

pub use catalog::load_catalog;
pub use mock::MockBackend;

use crate::domain::{NewTool, Tool};
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the ordered tool batch. May fail.
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Fetch every tool, in display order
    async fn fetch_tools(&self) -> Result<Vec<Tool>>;
}

/// Accepts new submissions. May fail.
#[async_trait]
pub trait ToolSink: Send + Sync {
    /// Store a submission and return the stored record
    async fn create_tool(&self, tool: NewTool) -> Result<Tool>;
}
