//! Toolify - a community tool directory
//!
//! Browse, search and submit community software, plugins and scripts. The
//! directory is backed by a mock in-memory backend; sign-in is simulated.

pub mod backend;
pub mod directory;
pub mod domain;
pub mod error;
pub mod notify;
pub mod session;
pub mod submission;

pub use error::{Result, ToolifyError};
