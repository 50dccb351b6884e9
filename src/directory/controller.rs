//! Directory state controller.
//!
//! Owns the loaded working set, the loading flag and the current filter, and
//! derives the visible subset on demand. Loads are split into `begin_load`
//! and `complete_load` so an event loop can start a fetch, keep handling
//! input while it runs, and apply the result later as its own event.

use super::filter::{CategoryFilter, ToolFilter};
use crate::backend::ToolSource;
use crate::domain::Tool;
use crate::error::{Result, ToolifyError};
use log::{debug, info, warn};
use std::collections::HashSet;

/// Feature switches for a directory instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Whether the category tabs take effect
    pub category_filter: bool,
    /// Whether `delete_tool` is permitted
    pub allow_delete: bool,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            category_filter: true,
            allow_delete: true,
        }
    }
}

/// Handle for one in-flight load. Only the newest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What `complete_load` did with a delivery.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Working set replaced with this many tools
    Applied(usize),
    /// Source failed; working set untouched
    Failed(ToolifyError),
    /// A newer load superseded this one; delivery dropped
    Stale,
}

impl LoadOutcome {
    /// Check if the delivery was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }
}

#[derive(Debug, Default)]
pub struct DirectoryController {
    tools: Vec<Tool>,
    loading: bool,
    filter: ToolFilter,
    generation: u64,
    pending: Option<u64>,
    options: DirectoryOptions,
}

impl DirectoryController {
    /// Create an empty controller.
    pub fn new(options: DirectoryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> DirectoryOptions {
        self.options
    }

    /// True from `begin_load` until the matching `complete_load`.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The full working set in load order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn filter(&self) -> &ToolFilter {
        &self.filter
    }

    pub fn search_term(&self) -> &str {
        &self.filter.search_term
    }

    pub fn selected_category(&self) -> CategoryFilter {
        self.filter.category
    }

    /// Mark a load as started and hand out its ticket.
    ///
    /// Any earlier outstanding ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if self.pending.is_some() {
            debug!("Load {} supersedes an in-flight load", self.generation);
        }
        self.pending = Some(self.generation);
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply the result of the load identified by `ticket`.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Tool>>) -> LoadOutcome {
        if self.pending != Some(ticket.0) {
            debug!("Dropping stale load {}", ticket.0);
            return LoadOutcome::Stale;
        }
        self.pending = None;
        self.loading = false;

        match result {
            Ok(batch) => {
                self.tools = dedup_by_id(batch);
                info!("Loaded {} tools", self.tools.len());
                LoadOutcome::Applied(self.tools.len())
            }
            Err(e) => {
                warn!("Tool load failed, keeping {} tools: {}", self.tools.len(), e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Fetch from `source` and apply the result in one step.
    pub async fn load<S: ToolSource + ?Sized>(&mut self, source: &S) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = source.fetch_tools().await;
        self.complete_load(ticket, result)
    }

    /// Replace the search term. Any string is accepted.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Replace the category filter.
    ///
    /// Returns false (and changes nothing) when category filtering is
    /// switched off for this directory.
    pub fn set_selected_category(&mut self, category: impl Into<CategoryFilter>) -> bool {
        if !self.options.category_filter {
            return false;
        }
        self.filter.category = category.into();
        true
    }

    /// Records passing the current filter, in load order.
    pub fn visible_tools(&self) -> Vec<&Tool> {
        self.filter.apply(&self.tools)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_tools().len()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Records submitted by `uid`, in load order.
    pub fn owned_by(&self, uid: &str) -> Vec<&Tool> {
        self.tools.iter().filter(|t| t.owner.as_deref() == Some(uid)).collect()
    }

    /// Append a record, e.g. one just accepted by the backend.
    pub fn insert(&mut self, tool: Tool) -> Result<()> {
        if self.get(&tool.id).is_some() {
            return Err(ToolifyError::DuplicateId(tool.id));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Remove the record with this id.
    ///
    /// Unknown ids are a no-op returning `Ok(None)`. Other records keep
    /// their relative order and the filter is left alone.
    pub fn delete_tool(&mut self, id: &str) -> Result<Option<Tool>> {
        if !self.options.allow_delete {
            return Err(ToolifyError::DeleteDisabled);
        }
        match self.tools.iter().position(|t| t.id == id) {
            Some(index) => {
                let removed = self.tools.remove(index);
                info!("Deleted tool {} ({})", removed.id, removed.name);
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }
}

/// Keep the first record for each id.
fn dedup_by_id(batch: Vec<Tool>) -> Vec<Tool> {
    let mut seen = HashSet::new();
    let before = batch.len();
    let tools: Vec<Tool> = batch.into_iter().filter(|t| seen.insert(t.id.clone())).collect();
    if tools.len() != before {
        warn!("Dropped {} tools with duplicate ids", before - tools.len());
    }
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::domain::{Category, mock_tools};

    fn loaded() -> DirectoryController {
        let mut dir = DirectoryController::default();
        let ticket = dir.begin_load();
        dir.complete_load(ticket, Ok(mock_tools()));
        dir
    }

    fn visible_names(dir: &DirectoryController) -> Vec<String> {
        dir.visible_tools().iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_new_controller_is_empty() {
        let dir = DirectoryController::default();
        assert!(!dir.is_loading());
        assert!(dir.tools().is_empty());
        assert!(dir.visible_tools().is_empty());
        assert_eq!(dir.search_term(), "");
        assert_eq!(dir.selected_category(), CategoryFilter::All);
    }

    #[test]
    fn test_begin_load_sets_loading_synchronously() {
        let mut dir = DirectoryController::default();
        let ticket = dir.begin_load();
        assert!(dir.is_loading());
        assert!(dir.tools().is_empty());

        let outcome = dir.complete_load(ticket, Ok(mock_tools()));
        assert!(matches!(outcome, LoadOutcome::Applied(6)));
        assert!(!dir.is_loading());
        assert_eq!(dir.tools().len(), 6);
    }

    #[test]
    fn test_failed_load_keeps_previous_tools() {
        let mut dir = loaded();
        let ticket = dir.begin_load();
        let outcome = dir.complete_load(ticket, Err(ToolifyError::Load("down".to_string())));
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert!(!dir.is_loading());
        assert_eq!(dir.tools().len(), 6);
    }

    #[test]
    fn test_failed_first_load_stays_empty() {
        let mut dir = DirectoryController::default();
        let ticket = dir.begin_load();
        dir.complete_load(ticket, Err(ToolifyError::Load("down".to_string())));
        assert!(!dir.is_loading());
        assert!(dir.tools().is_empty());
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let mut dir = DirectoryController::default();
        let first = dir.begin_load();
        let second = dir.begin_load();

        let stale = dir.complete_load(first, Ok(vec![mock_tools().remove(0)]));
        assert!(matches!(stale, LoadOutcome::Stale));
        assert!(dir.is_loading());
        assert!(dir.tools().is_empty());

        assert!(dir.complete_load(second, Ok(mock_tools())).is_applied());
        assert_eq!(dir.tools().len(), 6);

        // A late duplicate of the applied ticket is stale too
        assert!(matches!(dir.complete_load(second, Ok(vec![])), LoadOutcome::Stale));
        assert_eq!(dir.tools().len(), 6);
    }

    #[test]
    fn test_criteria_set_during_load_apply_after() {
        let mut dir = DirectoryController::default();
        let ticket = dir.begin_load();
        dir.set_search_term("fig");
        assert!(dir.visible_tools().is_empty());

        dir.complete_load(ticket, Ok(mock_tools()));
        assert_eq!(visible_names(&dir), vec!["Figma"]);
    }

    #[test]
    fn test_duplicate_ids_in_batch_keep_first() {
        let mut dir = DirectoryController::default();
        let mut batch = mock_tools();
        batch.push(Tool::new("1", "Impostor", "", "https://x", Category::Script));
        let ticket = dir.begin_load();
        assert!(matches!(dir.complete_load(ticket, Ok(batch)), LoadOutcome::Applied(6)));
        assert_eq!(dir.get("1").map(|t| t.name.as_str()), Some("Figma"));
    }

    #[test]
    fn test_search_scenario() {
        let mut dir = loaded();
        dir.set_search_term("fig");
        assert_eq!(visible_names(&dir), vec!["Figma"]);

        dir.set_search_term("");
        assert_eq!(visible_names(&dir).len(), 6);
        assert_eq!(visible_names(&dir)[..3], ["Figma", "Prettier", "Auto Deploy"]);
    }

    #[test]
    fn test_category_scenario() {
        let mut dir = loaded();
        assert!(dir.set_selected_category(Category::Plugin));
        assert_eq!(visible_names(&dir), vec!["Prettier", "ESLint"]);

        dir.set_selected_category(CategoryFilter::All);
        assert_eq!(dir.visible_count(), 6);
    }

    #[test]
    fn test_category_filter_disabled() {
        let mut dir = DirectoryController::new(DirectoryOptions {
            category_filter: false,
            allow_delete: true,
        });
        let ticket = dir.begin_load();
        dir.complete_load(ticket, Ok(mock_tools()));

        assert!(!dir.set_selected_category(Category::Plugin));
        assert_eq!(dir.selected_category(), CategoryFilter::All);
        assert_eq!(dir.visible_count(), 6);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut dir = loaded();
        dir.set_search_term("script");
        dir.set_selected_category(Category::Script);
        let once = visible_names(&dir);

        dir.set_search_term("script");
        dir.set_selected_category(Category::Script);
        assert_eq!(visible_names(&dir), once);
        assert_eq!(dir.tools().len(), 6);
    }

    #[test]
    fn test_delete_tool() {
        let mut dir = loaded();
        dir.set_search_term("e");

        let removed = dir.delete_tool("3").unwrap();
        assert_eq!(removed.map(|t| t.name), Some("Auto Deploy".to_string()));
        let ids: Vec<_> = dir.tools().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "5", "6"]);
        assert_eq!(dir.search_term(), "e");

        assert!(dir.delete_tool("3").unwrap().is_none());
        assert_eq!(dir.tools().len(), 5);
    }

    #[test]
    fn test_delete_disabled() {
        let mut dir = DirectoryController::new(DirectoryOptions {
            category_filter: true,
            allow_delete: false,
        });
        let ticket = dir.begin_load();
        dir.complete_load(ticket, Ok(mock_tools()));
        assert!(matches!(dir.delete_tool("1"), Err(ToolifyError::DeleteDisabled)));
        assert_eq!(dir.tools().len(), 6);
    }

    #[test]
    fn test_insert_and_owned_by() {
        let mut dir = loaded();
        let mine = Tool::new("7", "Mine", "", "https://m", Category::Script).with_owner("demo-user");
        dir.insert(mine.clone()).unwrap();
        assert!(matches!(dir.insert(mine), Err(ToolifyError::DuplicateId(_))));

        let owned = dir.owned_by("demo-user");
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, "7");
        assert!(dir.owned_by("someone-else").is_empty());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let backend = MockBackend::new();
        let mut dir = DirectoryController::default();
        assert!(dir.load(&backend).await.is_applied());
        assert_eq!(dir.tools().len(), 6);

        backend.set_fail_loads(true);
        assert!(matches!(dir.load(&backend).await, LoadOutcome::Failed(_)));
        assert_eq!(dir.tools().len(), 6);
        assert!(!dir.is_loading());
    }
}
