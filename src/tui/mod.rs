//! Terminal User Interface for Toolify.
//!
//! Three pages share one header and footer:
//! - **Explore**: search box, category tabs and the tool card grid
//! - **Submit**: the submission form (signed in only)
//! - **Dashboard**: the signed-in user's own tools
//!
//! The TUI runs as part of the main process using tokio for async operations.

mod app;
mod events;
mod input;
mod runner;
mod state;
mod views;

pub use app::App;
pub use events::EventHandler;
pub use runner::TuiRunner;
pub use state::AppState;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Palette for the directory.
pub mod colors {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Rgb(139, 92, 246); // Violet
    pub const ON_PRIMARY: Color = Color::White;
    pub const SELECTED: Color = Color::Rgb(49, 46, 129); // Indigo
    pub const DESTRUCTIVE: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SOFTWARE: Color = Color::Rgb(56, 189, 248); // Sky
    pub const PLUGIN: Color = Color::Rgb(250, 204, 21); // Amber
    pub const SCRIPT: Color = Color::Rgb(74, 222, 128); // Green
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const MUTED: Color = Color::Gray;
    pub const DIM: Color = Color::DarkGray;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_colors_distinct() {
        assert_ne!(colors::SOFTWARE, colors::PLUGIN);
        assert_ne!(colors::PLUGIN, colors::SCRIPT);
        assert_ne!(colors::PRIMARY, colors::DESTRUCTIVE);
    }
}
