//! Toast notification
//!
//! A non-blocking overlay that auto-dismisses. Expiry is a deadline checked
//! by the event loop tick, like every other timer in the UI.

use crate::tui::theme::Theme;
use crate::paging::timer::Deadline;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    expires: Deadline,
}

impl Toast {
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        let mut expires = Deadline::idle();
        expires.arm(now, TOAST_DURATION);
        Self {
            message: message.into(),
            expires,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires.due_at().map_or(true, |due| now >= due)
    }

    /// Render in the bottom-right corner, on top of everything else
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 cells of padding each side, plus borders
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
