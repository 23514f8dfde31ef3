// Theme for the dashboard
//
// One terminal-green palette. Colors are grouped by the role they play on
// screen, not by widget.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Title and status
    pub title: Color,
    pub status_bar: Color,
    pub highlight: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Market colors
    pub positive: Color,
    pub negative: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::terminal()
    }
}

impl Theme {
    /// Green-on-black terminal palette
    pub fn terminal() -> Self {
        Self {
            fg: Color::Rgb(0xd4, 0xd4, 0xd4),
            muted: Color::Rgb(0x80, 0x80, 0x80),
            border: Color::Rgb(0x3a, 0x5a, 0x40),
            border_focused: Color::Rgb(0x4a, 0xde, 0x80),
            border_type: BorderType::Rounded,

            title: Color::Rgb(0x4a, 0xde, 0x80),
            status_bar: Color::Rgb(0x9c, 0xa3, 0xaf),
            highlight: Color::Rgb(0xfa, 0xcc, 0x15),

            selected_bg: Color::Rgb(0x1f, 0x3a, 0x2a),
            selected_fg: Color::Rgb(0xff, 0xff, 0xff),

            positive: Color::Rgb(0x4a, 0xde, 0x80),
            negative: Color::Rgb(0xf8, 0x71, 0x71),

            log_error: Color::Rgb(0xf8, 0x71, 0x71),
            log_warn: Color::Rgb(0xfa, 0xcc, 0x15),
            log_info: Color::Rgb(0x9c, 0xa3, 0xaf),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.selected_fg).bg(self.selected_bg)
    }

    /// Green for gains, red for losses, muted when unknown
    pub fn change(&self, change: Option<f64>) -> Style {
        match change {
            Some(c) if c < 0.0 => Style::default().fg(self.negative),
            Some(_) => Style::default().fg(self.positive),
            None => Style::default().fg(self.muted),
        }
    }
}
