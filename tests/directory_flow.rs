//! Directory integration tests
//!
//! Drives the directory controller and submission flow against the mock
//! backend the way the TUI and CLI do.

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use toolify::backend::{MockBackend, ToolSource, load_catalog};
use toolify::directory::{CategoryFilter, DirectoryController, DirectoryOptions, LoadOutcome};
use toolify::domain::{Category, IconDisplay, mock_tools};
use toolify::error::Result;
use toolify::notify::Notification;
use toolify::session::Session;
use toolify::submission::SubmissionFlow;

async fn loaded() -> DirectoryController {
    let mut directory = DirectoryController::default();
    let outcome = directory.load(&MockBackend::new()).await;
    assert!(outcome.is_applied());
    directory
}

fn names(directory: &DirectoryController) -> Vec<&str> {
    directory.visible_tools().iter().map(|t| t.name.as_str()).collect()
}

/// No search and category "all" shows the whole set in source order
#[tokio::test]
async fn test_unfiltered_view_is_identity() {
    let directory = loaded().await;
    let expected: Vec<_> = mock_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(names(&directory), expected);
    assert_eq!(directory.visible_count(), 6);
}

/// Every visible tool satisfies the predicate, and nothing else does
#[tokio::test]
async fn test_visible_tools_match_predicate() {
    let mut directory = loaded().await;
    directory.set_search_term("CoDe");
    directory.set_selected_category(Category::Plugin);

    for tool in directory.tools() {
        let text_hit = tool.name.to_lowercase().contains("code") || tool.description.to_lowercase().contains("code");
        let shown = directory.visible_tools().iter().any(|t| t.id == tool.id);
        assert_eq!(shown, text_hit && tool.category == Category::Plugin, "{}", tool.name);
    }
}

/// Re-applying the same criteria does not change the view
#[tokio::test]
async fn test_filtering_is_idempotent() {
    let mut directory = loaded().await;
    directory.set_search_term("script");
    let first = names(&directory).into_iter().map(String::from).collect::<Vec<_>>();
    directory.set_search_term("script");
    assert_eq!(names(&directory), first);
}

#[tokio::test]
async fn test_search_fig_finds_figma() {
    let mut directory = loaded().await;
    directory.set_search_term("fig");
    assert_eq!(names(&directory), vec!["Figma"]);
}

/// Both plugins in the set carry the plugin category
#[tokio::test]
async fn test_plugin_category() {
    let mut directory = loaded().await;
    assert!(directory.set_selected_category(CategoryFilter::Only(Category::Plugin)));
    assert_eq!(names(&directory), vec!["Prettier", "ESLint"]);
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let mut directory = loaded().await;
    directory.set_search_term("zzz-nothing");
    assert_eq!(directory.visible_count(), 0);
    assert_eq!(directory.tools().len(), 6);
}

#[tokio::test]
async fn test_delete_removes_one_tool() -> Result<()> {
    let mut directory = loaded().await;
    let removed = directory.delete_tool("2")?;
    assert_eq!(removed.map(|t| t.name), Some("Prettier".to_string()));
    assert_eq!(directory.tools().len(), 5);
    assert!(directory.get("2").is_none());

    // Unknown id is a no-op
    assert!(directory.delete_tool("404")?.is_none());
    assert_eq!(directory.tools().len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_delete_disabled_by_options() {
    let mut directory = DirectoryController::new(DirectoryOptions {
        category_filter: true,
        allow_delete: false,
    });
    directory.load(&MockBackend::new()).await;
    assert!(directory.delete_tool("1").is_err());
    assert_eq!(directory.tools().len(), 6);
}

/// The loading flag is up before the fetch resolves
#[tokio::test]
async fn test_loading_flag_spans_fetch() {
    let backend = MockBackend::new().with_delays(Duration::from_millis(20), Duration::ZERO);
    let mut directory = DirectoryController::default();

    let ticket = directory.begin_load();
    assert!(directory.is_loading());
    assert_eq!(directory.visible_count(), 0);

    let result = backend.fetch_tools().await;
    assert!(directory.complete_load(ticket, result).is_applied());
    assert!(!directory.is_loading());
    assert_eq!(directory.visible_count(), 6);
}

#[tokio::test]
async fn test_failed_load_keeps_previous_set() {
    let backend = MockBackend::new();
    let mut directory = DirectoryController::default();
    directory.load(&backend).await;

    backend.set_fail_loads(true);
    let outcome = directory.load(&backend).await;
    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert!(!directory.is_loading());
    assert_eq!(directory.tools().len(), 6);
}

/// Empty name: "Missing fields", no backend call, form untouched
#[tokio::test]
async fn test_submission_with_empty_name_is_rejected() {
    let backend = MockBackend::new();
    let mut flow = SubmissionFlow::new();
    flow.form.description = "desc".to_string();
    flow.form.link = "https://example.com".to_string();
    flow.form.category = Some(Category::Script);
    let before = flow.form.clone();

    let mut notes: Vec<Notification> = Vec::new();
    let result = flow.submit(&backend, Some("demo-user"), &mut notes).await;

    assert!(result.is_err());
    assert_eq!(backend.create_count(), 0);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Missing fields");
    assert_eq!(flow.form, before);
    assert!(!flow.is_submitting());
}

/// A submitted tool shows up on the next fetch and on the owner's dashboard
#[tokio::test]
async fn test_submission_then_reload() -> Result<()> {
    let backend = MockBackend::new();
    let mut session = Session::new();
    session.login();
    let uid = session.user_id().map(str::to_string);

    let mut flow = SubmissionFlow::new();
    flow.form.name = "Ripgrep".to_string();
    flow.form.description = "Recursive regex search".to_string();
    flow.form.link = "https://github.com/BurntSushi/ripgrep".to_string();
    flow.form.category = Some(Category::Software);

    let mut notes: Vec<Notification> = Vec::new();
    let stored = flow.submit(&backend, uid.as_deref(), &mut notes).await?;
    assert_eq!(stored.id, "7");
    assert_eq!(notes[0].title, "Tool submitted!");
    assert!(flow.form.is_empty());

    let mut directory = DirectoryController::default();
    directory.load(&backend).await;
    assert_eq!(directory.tools().len(), 7);
    let mine = directory.owned_by(uid.as_deref().unwrap_or_default());
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Ripgrep");
    Ok(())
}

#[tokio::test]
async fn test_catalogue_seeds_backend() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"[
  {{"id": "a", "name": "htop", "description": "Process viewer", "iconURL": "", "link": "https://htop.dev", "type": "software"}},
  {{"id": "b", "name": "jq", "description": "JSON processor", "iconURL": "https://jq.dev/icon.png", "link": "https://jqlang.org", "type": "script"}}
]"#
    )?;

    let tools = load_catalog(file.path())?;
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0].icon_display(), IconDisplay::Initial('H'));

    let backend = MockBackend::from_catalog(file.path())?;
    let mut directory = DirectoryController::default();
    directory.load(&backend).await;
    directory.set_selected_category(Category::Script);
    assert_eq!(names(&directory), vec!["jq"]);
    Ok(())
}
