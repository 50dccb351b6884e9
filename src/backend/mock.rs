//! In-memory backend with simulated latency.

use super::{ToolSink, ToolSource, load_catalog};
use crate::domain::{NewTool, Tool, mock_tools};
use crate::error::{Result, ToolifyError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Stand-in for a real backend.
///
/// Fetches return a copy of the in-memory list after `load_delay`; creates
/// append to it after `submit_delay`. Nothing is written anywhere else, so a
/// new process always starts from the seed data again.
#[derive(Debug)]
pub struct MockBackend {
    tools: Mutex<Vec<Tool>>,
    load_delay: Duration,
    submit_delay: Duration,
    fail_loads: AtomicBool,
    fail_submits: AtomicBool,
    fetch_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MockBackend {
    /// Backend seeded with the six built-in tools and no delay
    pub fn new() -> Self {
        Self::with_tools(mock_tools())
    }

    /// Backend seeded with the given tools and no delay
    pub fn with_tools(tools: Vec<Tool>) -> Self {
        Self {
            tools: Mutex::new(tools),
            load_delay: Duration::ZERO,
            submit_delay: Duration::ZERO,
            fail_loads: AtomicBool::new(false),
            fail_submits: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Backend seeded from a JSON catalogue file
    pub fn from_catalog(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_tools(load_catalog(path)?))
    }

    /// Set the simulated latency for fetches and creates
    pub fn with_delays(mut self, load_delay: Duration, submit_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self.submit_delay = submit_delay;
        self
    }

    /// Make subsequent fetches fail (or succeed again)
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent creates fail (or succeed again)
    pub fn set_fail_submits(&self, fail: bool) {
        self.fail_submits.store(fail, Ordering::SeqCst);
    }

    /// Number of `fetch_tools` calls so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `create_tool` calls so far
    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored tools
    pub async fn snapshot(&self) -> Vec<Tool> {
        self.tools.lock().await.clone()
    }

    async fn simulate(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Next free numeric id: one past the largest numeric id in use.
fn next_id(tools: &[Tool]) -> String {
    let max = tools.iter().filter_map(|t| t.id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

#[async_trait]
impl ToolSource for MockBackend {
    async fn fetch_tools(&self) -> Result<Vec<Tool>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Self::simulate(self.load_delay).await;

        if self.fail_loads.load(Ordering::SeqCst) {
            tracing::warn!("Mock backend refusing fetch");
            return Err(ToolifyError::Load("backend unavailable".to_string()));
        }

        let tools = self.tools.lock().await.clone();
        tracing::debug!(count = tools.len(), "Mock backend delivered tools");
        Ok(tools)
    }
}

#[async_trait]
impl ToolSink for MockBackend {
    async fn create_tool(&self, tool: NewTool) -> Result<Tool> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Self::simulate(self.submit_delay).await;

        if self.fail_submits.load(Ordering::SeqCst) {
            tracing::warn!(name = %tool.name, "Mock backend refusing submission");
            return Err(ToolifyError::Submission("backend rejected the tool".to_string()));
        }

        let mut tools = self.tools.lock().await;
        let stored = tool.into_tool(next_id(&tools));
        tools.push(stored.clone());
        tracing::info!(id = %stored.id, name = %stored.name, "Mock backend stored tool");
        Ok(stored)
    }
}
