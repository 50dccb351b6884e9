//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, event handler and backend. It runs
//! the main loop: render → handle events → start pending work → repeat.
//! Backend calls run on spawned tasks and report back through the event
//! channel, so the screen keeps redrawing while a fetch or submit is in flight.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views::render;
use eyre::Result;
use log::{debug, info};
use std::sync::Arc;
use toolify::backend::{ToolSink, ToolSource};
use toolify::domain::NewTool;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner<B> {
    /// The terminal instance
    terminal: Tui,
    /// Application state and input handling
    app: App,
    /// Event handler for keyboard, tick and backend events
    event_handler: EventHandler,
    /// Where tools come from and submissions go
    backend: Arc<B>,
}

impl<B> TuiRunner<B>
where
    B: ToolSource + ToolSink + 'static,
{
    pub fn new(terminal: Tui, app: App, event_handler: EventHandler, backend: Arc<B>) -> Self {
        Self {
            terminal,
            app,
            event_handler,
            backend,
        }
    }

    /// Run the main TUI loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");
        self.app.request_load();
        self.process_pending_actions();

        loop {
            // 1. Render current state
            self.terminal.draw(|f| render(self.app.state(), f))?;

            // 2. Handle events
            let event = self.event_handler.next().await?;
            match event {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Tick => self.app.on_tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize on next draw
                }
                Event::Loaded(ticket, result) => self.app.on_loaded(ticket, result),
                Event::Submitted(result) => self.app.on_submitted(result),
            }

            // 3. Start pending work
            self.process_pending_actions();

            // 4. Check for quit
            if self.app.state().should_quit {
                break;
            }
        }

        info!("TUI main loop ended");
        Ok(())
    }

    fn process_pending_actions(&mut self) {
        match self.app.state_mut().pending_action.take() {
            Some(PendingAction::Load) => self.spawn_load(),
            Some(PendingAction::Submit(tool)) => self.spawn_submit(tool),
            None => {}
        }
    }

    fn spawn_load(&mut self) {
        let ticket = self.app.state_mut().directory.begin_load();
        let backend = Arc::clone(&self.backend);
        let tx = self.event_handler.sender();
        debug!("Fetching tools ({:?})", ticket);

        tokio::spawn(async move {
            let result = backend.fetch_tools().await;
            // The receiver is gone only after the loop has exited
            let _ = tx.send(Event::Loaded(ticket, result));
        });
    }

    fn spawn_submit(&mut self, tool: NewTool) {
        let backend = Arc::clone(&self.backend);
        let tx = self.event_handler.sender();
        info!("Submitting tool: {}", tool.name);

        tokio::spawn(async move {
            let result = backend.create_tool(tool).await;
            let _ = tx.send(Event::Submitted(result));
        });
    }
}
