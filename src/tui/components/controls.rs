//! Page controls under a panel
//!
//! Pure renderers from [`NavControls`] to a single line. Navigation itself
//! goes through the panel's key handling, so the line carries no callbacks.

use crate::tui::theme::Theme;
use crate::config::ControlsVariant;
use crate::paging::NavControls;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub fn render(variant: ControlsVariant, nav: NavControls, theme: &Theme) -> Line<'static> {
    match variant {
        ControlsVariant::Simple => simple(nav, theme),
        ControlsVariant::Numbered => numbered(nav, theme),
    }
}

fn enabled_style(enabled: bool, theme: &Theme) -> Style {
    if enabled {
        Style::default().fg(theme.fg)
    } else {
        Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
    }
}

/// `◀ Prev  Page 2 of 3  Next ▶`
fn simple(nav: NavControls, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("◀ Prev", enabled_style(nav.has_previous(), theme)),
        Span::raw("  "),
        Span::styled(
            format!("Page {} of {}", nav.current_page, nav.total_pages),
            Style::default().fg(theme.muted),
        ),
        Span::raw("  "),
        Span::styled("Next ▶", enabled_style(nav.has_next(), theme)),
    ])
    .centered()
}

/// `‹ 1 [2] 3 ›`
fn numbered(nav: NavControls, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("‹", enabled_style(nav.has_previous(), theme))];
    for page in nav.pages() {
        spans.push(Span::raw(" "));
        if page == nav.current_page {
            spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(page.to_string(), Style::default().fg(theme.fg)));
        }
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled("›", enabled_style(nav.has_next(), theme)));
    Line::from(spans).centered()
}
