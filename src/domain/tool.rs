//! Tool record and related types
//!
//! A Tool is one entry in the community directory. Records are produced by a
//! backend and handed to the directory as an immutable batch; nothing in the
//! directory core edits a record after it has been loaded.

use crate::error::{Result, ToolifyError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Opaque identifier, unique within the loaded working set
    pub id: String,

    /// Display name (never empty for a valid record)
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Optional icon URL; `None` means "no icon"
    #[serde(
        rename = "iconURL",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_url: Option<String>,

    /// External resource the tool points to
    pub link: String,

    /// Software, plugin or script
    #[serde(rename = "type")]
    pub category: Category,

    /// Submitter's user id, when known
    #[serde(rename = "uid", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Tool {
    /// Create a tool with no icon and no owner
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon_url: None,
            link: link.into(),
            category,
            owner: None,
        }
    }

    /// Attach an icon URL
    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Attach an owner reference
    pub fn with_owner(mut self, uid: impl Into<String>) -> Self {
        self.owner = Some(uid.into());
        self
    }

    /// Resolve how the card header should show this tool
    pub fn icon_display(&self) -> IconDisplay {
        match &self.icon_url {
            Some(url) => IconDisplay::Icon(url.clone()),
            None => IconDisplay::Initial(self.initial()),
        }
    }

    /// Upper-cased first character of the name, `?` for an empty name
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Case-insensitive substring match against name or description.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_lowered(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Icon presentation, resolved once at render time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconDisplay {
    /// Tool supplied an icon URL
    Icon(String),
    /// Fallback badge with the name's initial
    Initial(char),
}

/// The closed set of tool categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Software,
    Plugin,
    Script,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Software, Category::Plugin, Category::Script];

    /// Lower-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Software => "software",
            Category::Plugin => "plugin",
            Category::Script => "script",
        }
    }

    /// Capitalized label for menus and form options
    pub fn label(&self) -> &'static str {
        match self {
            Category::Software => "Software",
            Category::Plugin => "Plugin",
            Category::Script => "Script",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ToolifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "software" => Ok(Category::Software),
            "plugin" => Ok(Category::Plugin),
            "script" => Ok(Category::Script),
            other => Err(ToolifyError::UnknownCategory(other.to_string())),
        }
    }
}

/// A validated submission, not yet assigned an id by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTool {
    pub name: String,
    pub description: String,
    #[serde(rename = "iconURL", default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub link: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "uid", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl NewTool {
    /// Turn the submission into a stored record under the given id
    pub fn into_tool(self, id: impl Into<String>) -> Tool {
        Tool {
            id: id.into(),
            name: self.name,
            description: self.description,
            icon_url: self.icon_url,
            link: self.link,
            category: self.category,
            owner: self.owner,
        }
    }
}
