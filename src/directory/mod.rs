//! The tool directory: working set, loading state and search criteria.

mod controller;
mod filter;

pub use controller::{DirectoryController, DirectoryOptions, LoadOutcome, LoadTicket};
pub use filter::{CategoryFilter, ToolFilter};
