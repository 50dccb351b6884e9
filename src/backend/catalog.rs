//! JSON catalogue files.
//!
//! A catalogue is a JSON array of tool records in the same shape the
//! directory serializes (`id`, `name`, `description`, `iconURL`, `link`,
//! `type`, `uid`). Catalogues are read-only.

use crate::domain::Tool;
use crate::error::{Result, ToolifyError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read and check a catalogue file.
///
/// Rejects duplicate ids and records with a blank name.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Tool>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let tools: Vec<Tool> = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    for tool in &tools {
        if tool.name.trim().is_empty() {
            return Err(ToolifyError::ValidationFailed(format!("tool {} has an empty name", tool.id)));
        }
        if !seen.insert(tool.id.as_str()) {
            return Err(ToolifyError::DuplicateId(tool.id.clone()));
        }
    }

    tracing::info!(path = %path.display(), count = tools.len(), "Loaded tool catalogue");
    Ok(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog() {
        let file = write_catalog(
            r#"[
                {"id": "a", "name": "jq", "description": "JSON processor", "link": "https://jqlang.org", "type": "software"},
                {"id": "b", "name": "fmt-on-save", "description": "", "iconURL": "https://x/i.png", "link": "https://x", "type": "plugin", "uid": "u1"}
            ]"#,
        );
        let tools = load_catalog(file.path()).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].category, Category::Software);
        assert_eq!(tools[1].icon_url.as_deref(), Some("https://x/i.png"));
        assert_eq!(tools[1].owner.as_deref(), Some("u1"));
    }

    #[test]
    fn test_load_catalog_rejects_duplicate_ids() {
        let file = write_catalog(
            r#"[
                {"id": "a", "name": "one", "description": "", "link": "https://1", "type": "script"},
                {"id": "a", "name": "two", "description": "", "link": "https://2", "type": "script"}
            ]"#,
        );
        assert!(matches!(load_catalog(file.path()), Err(ToolifyError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_load_catalog_rejects_blank_name() {
        let file = write_catalog(r#"[{"id": "a", "name": "  ", "description": "", "link": "https://1", "type": "script"}]"#);
        assert!(matches!(load_catalog(file.path()), Err(ToolifyError::ValidationFailed(_))));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog("/nonexistent/toolify-catalog.json");
        assert!(matches!(result, Err(ToolifyError::Io(_))));
    }

    #[test]
    fn test_load_catalog_malformed() {
        let file = write_catalog("{ not json");
        assert!(matches!(load_catalog(file.path()), Err(ToolifyError::Json(_))));
    }
}
