// Title bar component
//
// App name, demo badge, market sentiment and the wall clock.

use crate::feeds::Sentiment;
use crate::tui::app::App;
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " 📈 tickerdash",
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];

    if app.demo_mode {
        spans.push(Span::styled(
            "  [DEMO]",
            Style::default().fg(theme.log_warn).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(sentiment) = app.sentiment() {
        let color = match sentiment {
            Sentiment::Bullish => theme.positive,
            Sentiment::Bearish => theme.negative,
        };
        spans.push(Span::styled("  ──── ", Style::default().fg(theme.border)));
        spans.push(Span::styled(
            format!("market {}", sentiment),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let clock = Local::now().format(" %a %d %b %H:%M:%S ").to_string();
    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.title))
            .title_top(Line::styled(clock, Style::default().fg(theme.muted)).right_aligned()),
    );

    f.render_widget(title, area);
}
