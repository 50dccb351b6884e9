//! Search and category filter applied to the directory working set.

use crate::domain::{Category, Tool};
use crate::error::{Result, ToolifyError};
use std::fmt;
use std::str::FromStr;

/// Category half of the filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Tab order: all, software, plugin, script
    pub const OPTIONS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Software),
        CategoryFilter::Only(Category::Plugin),
        CategoryFilter::Only(Category::Script),
    ];

    /// Check if a record's category passes this filter.
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    /// Lower-case name, `all` for no filter
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    fn position(self) -> usize {
        Self::OPTIONS.iter().position(|o| *o == self).unwrap_or(0)
    }

    /// Cycle to the next tab.
    pub fn next(self) -> Self {
        Self::OPTIONS[(self.position() + 1) % Self::OPTIONS.len()]
    }

    /// Cycle to the previous tab.
    pub fn prev(self) -> Self {
        let len = Self::OPTIONS.len();
        Self::OPTIONS[(self.position() + len - 1) % len]
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map(CategoryFilter::Only).unwrap_or_default()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = ToolifyError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// Current search criteria.
///
/// A record is visible when the lower-cased search term is a substring of its
/// lower-cased name or description, and its category passes the category
/// filter. The empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// Raw search text as typed
    pub search_term: String,
    /// Category restriction
    pub category: CategoryFilter,
}

impl ToolFilter {
    /// Create a filter that admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the category restriction.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    fn matches_with(&self, needle: &str, tool: &Tool) -> bool {
        tool.matches_lowered(needle) && self.category.admits(tool.category)
    }

    /// Select the passing records, keeping their original order.
    pub fn apply<'a>(&self, tools: &'a [Tool]) -> Vec<&'a Tool> {
        let needle = self.search_term.to_lowercase();
        tools.iter().filter(|t| self.matches_with(&needle, t)).collect()
    }
}
