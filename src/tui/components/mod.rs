// Components module - reusable UI building blocks
//
// Shell components are rendered around the panel grid:
// - Title bar: App name, demo badge, market sentiment, clock
// - Status bar: Latest log line and key hints
// - Toast: Transient notification overlay
//
// Page controls are drawn inside each feed panel.

pub mod controls;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
