// Status bar component
//
// Latest log line on the left, key hints on the right.

use crate::logging::LogLevel;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const KEY_HINTS: &str = "Tab focus  ←/→ page  ↑/↓ select  y copy  r refresh  R refetch all  v layout  q quit ";

/// Render the status bar with the latest log entry and key hints
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let hints_width = (KEY_HINTS.width() as u16).min(inner.width / 2);
    let [log_area, hints_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(inner);

    if let Some(entry) = app.log_buffer.latest(LogLevel::Info) {
        let color = match entry.level {
            LogLevel::Error => theme.log_error,
            LogLevel::Warn => theme.log_warn,
            _ => theme.log_info,
        };
        let line = format!(
            " {} {} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.level.as_str(),
            entry.display_line()
        );
        f.render_widget(
            Paragraph::new(Line::styled(line, Style::default().fg(color))),
            log_area,
        );
    }

    f.render_widget(
        Paragraph::new(Line::styled(KEY_HINTS, Style::default().fg(theme.status_bar)).right_aligned()),
        hints_area,
    );
}
