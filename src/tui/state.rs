//! Application state for the TUI.
//!
//! This module defines the core state types that drive the TUI:
//! - `AppState`: All mutable application state
//! - `View`: Which page is currently shown
//! - `InteractionMode`: Current input mode (normal, search, form, help, confirm)

use super::input::TextInput;
use crate::config::Config;
use toolify::directory::{DirectoryController, DirectoryOptions};
use toolify::domain::{NewTool, Tool};
use toolify::notify::Toasts;
use toolify::session::Session;
use toolify::submission::{FormField, SubmissionFlow};

/// The primary application state.
///
/// Owned by `App` and updated in response to key and backend events.
#[derive(Debug)]
pub struct AppState {
    // View state
    /// Currently shown page
    pub current_view: View,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,

    // Directory state
    /// Working set, loading flag and filter
    pub directory: DirectoryController,
    /// Search box contents (mirrored into the directory on every edit)
    pub search_input: TextInput,
    /// Selected card in the visible grid (or dashboard list)
    pub selected: usize,

    // Submission state
    /// Form and submitting flag
    pub submission: SubmissionFlow,
    /// Focused form field
    pub focused_field: FormField,
    /// Editing buffer for the focused text field
    pub field_input: TextInput,

    /// Mocked sign-in
    pub session: Session,
    /// Active toasts
    pub toasts: Toasts,
    /// One-line status (e.g. the link of an opened tool)
    pub status_message: Option<String>,

    // Pending actions (processed by runner)
    pub pending_action: Option<PendingAction>,

    // Control flags
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    /// Create state for the given directory options and toast lifetime.
    pub fn new(options: DirectoryOptions, toast_ttl_ms: u64) -> Self {
        Self {
            current_view: View::default(),
            interaction_mode: InteractionMode::default(),
            directory: DirectoryController::new(options),
            search_input: TextInput::new(),
            selected: 0,
            submission: SubmissionFlow::new(),
            focused_field: FormField::default(),
            field_input: TextInput::new(),
            session: Session::new(),
            toasts: Toasts::new(toast_ttl_ms),
            status_message: None,
            pending_action: None,
            should_quit: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.directory.options(), config.tui.toast_ttl_ms)
    }

    /// Tools listed on the current page: the filtered grid, or the
    /// signed-in user's own tools on the dashboard. Empty while a load is
    /// in flight.
    pub fn listed_tools(&self) -> Vec<&Tool> {
        if self.directory.is_loading() {
            return Vec::new();
        }
        match self.current_view {
            View::Dashboard => self
                .session
                .user_id()
                .map(|uid| self.directory.owned_by(uid))
                .unwrap_or_default(),
            _ => self.directory.visible_tools(),
        }
    }

    /// The tool under the selection cursor, if any.
    pub fn selected_tool(&self) -> Option<&Tool> {
        self.listed_tools().get(self.selected).copied()
    }

    /// Keep the selection inside the listed tools.
    pub fn clamp_selection(&mut self) {
        let len = self.listed_tools().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Header text for the directory grid, e.g. "Featured Tools (6)".
    pub fn heading(&self) -> String {
        let count = if self.directory.is_loading() {
            0
        } else {
            self.directory.visible_count()
        };
        format!("Featured Tools ({})", count)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DirectoryOptions::default(), 4000)
    }
}

/// Which page is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Browse and search
    #[default]
    Directory,
    /// Submission form (signed in only)
    Submit,
    /// Own tools with delete (signed in only)
    Dashboard,
}

impl View {
    /// Cycle to the next page the user may see.
    pub fn next(self, authenticated: bool) -> Self {
        match (self, authenticated) {
            (_, false) => View::Directory,
            (View::Directory, true) => View::Submit,
            (View::Submit, true) => View::Dashboard,
            (View::Dashboard, true) => View::Directory,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            View::Directory => "Explore",
            View::Submit => "Submit",
            View::Dashboard => "Dashboard",
        }
    }
}

/// Current interaction mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Normal navigation
    #[default]
    Normal,
    /// Typing in the search box
    Search,
    /// Editing the submission form
    Form,
    /// Help overlay visible
    Help,
    /// Confirmation dialog
    Confirm(ConfirmDialog),
}

/// Confirmation dialog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    /// The message to display
    pub message: String,
    /// The action to take on confirm
    pub action: ConfirmAction,
}

/// Actions that require confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Remove a tool from the directory
    DeleteTool(String),
}

/// Work for the runner to start outside the key handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Fetch the tool batch
    Load,
    /// Hand a validated submission to the backend
    Submit(NewTool),
}
