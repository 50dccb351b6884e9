//! TUI Application
//!
//! Key handling and event application. Every transition runs to completion
//! on the event loop; slow work is left in `pending_action` for the runner.

use super::state::{AppState, ConfirmAction, ConfirmDialog, InteractionMode, PendingAction, View};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use toolify::directory::{CategoryFilter, LoadOutcome, LoadTicket};
use toolify::domain::{Category, Tool};
use toolify::notify::{Notification, Notifier};
use toolify::submission::FormField;

/// Main TUI application
#[derive(Debug, Default)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Request to quit
    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    /// Ask the runner to (re)load the directory.
    pub fn request_load(&mut self) {
        self.state.pending_action = Some(PendingAction::Load);
    }

    /// Handle a key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match self.state.interaction_mode.clone() {
            InteractionMode::Help => self.state.interaction_mode = InteractionMode::Normal,
            InteractionMode::Confirm(dialog) => self.handle_confirm_key(key, dialog),
            InteractionMode::Search => self.handle_search_key(key),
            InteractionMode::Form => self.handle_form_key(key),
            InteractionMode::Normal => self.handle_normal_key(key),
        }

        self.state.should_quit
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('?') => self.state.interaction_mode = InteractionMode::Help,
            KeyCode::Tab => self.next_view(),
            KeyCode::Char('L') => self.toggle_login(),
            KeyCode::Char('r') => self.request_load(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            _ => match self.state.current_view {
                View::Directory => self.handle_directory_key(key),
                View::Submit => self.handle_submit_view_key(key),
                View::Dashboard => self.handle_dashboard_key(key),
            },
        }
    }

    fn handle_directory_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.state.interaction_mode = InteractionMode::Search,
            KeyCode::Right | KeyCode::Char(']') => {
                let next = self.state.directory.selected_category().next();
                self.set_category(next);
            }
            KeyCode::Left | KeyCode::Char('[') => {
                let prev = self.state.directory.selected_category().prev();
                self.set_category(prev);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = (c as usize) - ('1' as usize);
                self.set_category(CategoryFilter::OPTIONS[index]);
            }
            KeyCode::Esc => {
                self.state.search_input.clear();
                self.state.directory.set_search_term("");
                self.state.clamp_selection();
            }
            _ => {}
        }
    }

    fn handle_submit_view_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('i') | KeyCode::Char('e')) {
            self.state.interaction_mode = InteractionMode::Form;
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('d')
            && let Some(tool) = self.state.selected_tool()
        {
            let dialog = ConfirmDialog {
                message: format!("Delete \"{}\"? (y/n)", tool.name),
                action: ConfirmAction::DeleteTool(tool.id.clone()),
            };
            self.state.interaction_mode = InteractionMode::Confirm(dialog);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.state.interaction_mode = InteractionMode::Normal,
            _ => {
                if self.state.search_input.handle_key(&key) {
                    let term = self.state.search_input.content().to_string();
                    self.state.directory.set_search_term(term);
                    self.state.clamp_selection();
                }
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let on_category = self.state.focused_field == FormField::Category;
        match key.code {
            KeyCode::Esc => {
                self.commit_field();
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => self.focus_field(self.state.focused_field.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus_field(self.state.focused_field.prev()),
            KeyCode::Enter => self.submit(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_category => {
                self.state.submission.form.cycle_category();
            }
            KeyCode::Char(c) if on_category => self.pick_category(c),
            KeyCode::Backspace if on_category => self.state.submission.form.category = None,
            _ if !on_category => {
                self.state.field_input.handle_key(&key);
            }
            _ => {}
        }
    }

    /// Select by initial; repeating a letter steps through the categories
    /// sharing it (s: software, script).
    fn pick_category(&mut self, initial: char) {
        let initial = initial.to_ascii_lowercase();
        let matching: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|cat| cat.as_str().starts_with(initial))
            .collect();
        let current = self.state.submission.form.category;
        let next = match current.and_then(|cur| matching.iter().position(|m| *m == cur)) {
            Some(i) => matching.get((i + 1) % matching.len()),
            None => matching.first(),
        };
        if let Some(category) = next.copied() {
            self.state.submission.form.category = Some(category);
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, dialog: ConfirmDialog) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match dialog.action {
                    ConfirmAction::DeleteTool(id) => self.delete_tool(&id),
                }
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {}
        }
    }

    /// Switch to the next page available to the current session.
    pub fn next_view(&mut self) {
        let authenticated = self.state.session.is_authenticated();
        self.set_view(self.state.current_view.next(authenticated));
    }

    /// Switch to a page. Submit and Dashboard fall back to Directory when
    /// signed out.
    pub fn set_view(&mut self, view: View) {
        let view = if self.state.session.is_authenticated() {
            view
        } else {
            View::Directory
        };
        self.state.current_view = view;
        self.state.selected = 0;
        if view == View::Submit {
            self.state.interaction_mode = InteractionMode::Form;
            self.load_field();
        }
    }

    pub fn toggle_login(&mut self) {
        self.state.session.toggle();
        if !self.state.session.is_authenticated() {
            self.set_view(View::Directory);
        }
    }

    fn set_category(&mut self, category: CategoryFilter) {
        if self.state.directory.set_selected_category(category) {
            self.state.clamp_selection();
        }
    }

    pub fn select_next(&mut self) {
        let len = self.state.listed_tools().len();
        if len > 0 {
            self.state.selected = (self.state.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.state.listed_tools().len();
        if len > 0 {
            self.state.selected = (self.state.selected + len - 1) % len;
        }
    }

    /// Show the selected tool's link in the status line.
    pub fn open_selected(&mut self) {
        if self.state.current_view == View::Submit {
            return;
        }
        if let Some(link) = self.state.selected_tool().map(|t| t.link.clone()) {
            info!("Opening {}", link);
            self.state.status_message = Some(format!("Open: {}", link));
        }
    }

    fn delete_tool(&mut self, id: &str) {
        if self.state.directory.is_loading() {
            self.state.status_message = Some("Still loading, nothing deleted".to_string());
            return;
        }
        match self.state.directory.delete_tool(id) {
            Ok(Some(tool)) => self.state.status_message = Some(format!("Deleted {}", tool.name)),
            Ok(None) => {}
            Err(e) => self.state.status_message = Some(e.to_string()),
        }
        self.state.clamp_selection();
    }

    /// Write the edit buffer into the focused form field.
    fn commit_field(&mut self) {
        let field = self.state.focused_field;
        if field == FormField::Category {
            return;
        }
        let value = self.state.field_input.content().to_string();
        if let Err(e) = self.state.submission.form.set(field, &value) {
            warn!("Could not set {}: {}", field.key(), e);
        }
    }

    /// Load the focused form field into the edit buffer.
    fn load_field(&mut self) {
        let value = self.state.submission.form.value(self.state.focused_field);
        self.state.field_input.set(&value);
    }

    fn focus_field(&mut self, field: FormField) {
        self.commit_field();
        self.state.focused_field = field;
        self.load_field();
    }

    /// Validate the form and queue it for the backend.
    pub fn submit(&mut self) {
        self.commit_field();
        let state = &mut self.state;
        let owner = state.session.user_id().map(str::to_string);
        if let Ok(tool) = state.submission.begin_submit(owner.as_deref(), &mut state.toasts) {
            state.pending_action = Some(PendingAction::Submit(tool));
        }
    }

    /// Apply a finished fetch.
    pub fn on_loaded(&mut self, ticket: LoadTicket, result: toolify::Result<Vec<Tool>>) {
        if let LoadOutcome::Failed(_) = self.state.directory.complete_load(ticket, result) {
            self.state.toasts.notify(Notification::load_failed());
        }
        self.state.clamp_selection();
    }

    /// Apply a finished submission.
    pub fn on_submitted(&mut self, result: toolify::Result<Tool>) {
        let state = &mut self.state;
        if let Ok(tool) = state.submission.complete_submit(result, &mut state.toasts)
            && let Err(e) = state.directory.insert(tool)
        {
            warn!("Submitted tool not added to directory: {}", e);
        }
        self.load_field();
    }

    /// Periodic housekeeping.
    pub fn on_tick(&mut self) {
        self.state.toasts.prune(Local::now());
    }
}
