//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, tick, backend completions)
//! - `EventHandler`: Merges terminal input with results posted by backend tasks

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use toolify::directory::LoadTicket;
use toolify::domain::Tool;

/// Unified event type for the TUI.
#[derive(Debug)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Periodic tick for toast expiry
    Tick,
    /// Terminal resize
    Resize(u16, u16),
    /// A tool fetch finished
    Loaded(LoadTicket, toolify::Result<Vec<Tool>>),
    /// A submission finished
    Submitted(toolify::Result<Tool>),
}

/// Handles keyboard, tick and backend events.
///
/// Backend tasks post into an unbounded channel; `next` drains that first so
/// completions are applied in arrival order between key presses.
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            tx,
            rx,
        }
    }

    /// Sender for backend tasks to post completions.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Get the next event.
    ///
    /// A pending backend event wins; otherwise poll the terminal for up to
    /// one tick.
    pub async fn next(&mut self) -> Result<Event> {
        if let Ok(event) = self.rx.try_recv() {
            return Ok(event);
        }

        let tick_rate = self.tick_rate;
        let event = tokio::task::spawn_blocking(move || -> Result<Event> {
            if event::poll(tick_rate)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => {
                        // Only handle key press events, not release
                        if key.kind == KeyEventKind::Press {
                            Ok(Event::Key(key))
                        } else {
                            Ok(Event::Tick)
                        }
                    }
                    CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                    _ => Ok(Event::Tick),
                }
            } else {
                Ok(Event::Tick)
            }
        })
        .await??;

        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}
