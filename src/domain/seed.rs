//! Built-in directory contents used by the mock backend.

use super::tool::{Category, Tool};

/// The six community tools every fresh mock backend starts with
pub fn mock_tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "1",
            "Figma",
            "Collaborative interface design tool for teams to create, prototype, and gather feedback.",
            "https://figma.com",
            Category::Software,
        ),
        Tool::new(
            "2",
            "Prettier",
            "Opinionated code formatter that supports many languages and integrates with most editors.",
            "https://prettier.io",
            Category::Plugin,
        ),
        Tool::new(
            "3",
            "Auto Deploy",
            "Automated deployment script for CI/CD pipelines with zero-downtime deployments.",
            "https://github.com/example/auto-deploy",
            Category::Script,
        ),
        Tool::new(
            "4",
            "VS Code",
            "Powerful code editor with built-in support for debugging, Git control, and extensions.",
            "https://code.visualstudio.com",
            Category::Software,
        ),
        Tool::new(
            "5",
            "ESLint",
            "Static analysis tool for identifying problematic patterns in JavaScript code.",
            "https://eslint.org",
            Category::Plugin,
        ),
        Tool::new(
            "6",
            "Database Backup",
            "Reliable database backup script with compression and cloud storage integration.",
            "https://github.com/example/db-backup",
            Category::Script,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mock_tools_ids_unique() {
        let tools = mock_tools();
        assert_eq!(tools.len(), 6);
        let ids: HashSet<_> = tools.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tools.len());
    }

    #[test]
    fn test_mock_tools_cover_every_category() {
        let tools = mock_tools();
        for category in Category::ALL {
            assert_eq!(tools.iter().filter(|t| t.category == category).count(), 2);
        }
    }

    #[test]
    fn test_mock_tools_have_no_icon_or_owner() {
        assert!(mock_tools().iter().all(|t| t.icon_url.is_none() && t.owner.is_none()));
    }
}
