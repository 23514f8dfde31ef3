//! Per-feed item renderers
//!
//! Each feed item knows how to draw itself as a list row and, optionally,
//! as a card. The paging engine calls these through the panel; it never
//! sees the item types.

use super::theme::Theme;
use crate::feeds::tickers::change_label;
use crate::feeds::{github::compact_count, FeedItem, GithubRepo, HnStory, NewsItem, TickerData};
use chrono::{DateTime, Utc};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// What a renderer may depend on besides the item
pub struct RowContext<'a> {
    pub theme: &'a Theme,
    pub selected: bool,
    pub now: DateTime<Utc>,
}

pub trait ItemView: FeedItem {
    /// Column header drawn above the rows, if the feed has one
    fn header(_theme: &Theme) -> Option<Line<'static>> {
        None
    }

    fn row(&self, ctx: &RowContext<'_>) -> Text<'static>;

    /// Compact tile for the card layout; defaults to the row
    fn card(&self, ctx: &RowContext<'_>) -> Text<'static> {
        self.row(ctx)
    }
}

/// Apply the selection highlight over a rendered item
fn finish(text: Text<'static>, ctx: &RowContext<'_>) -> Text<'static> {
    if ctx.selected {
        text.patch_style(ctx.theme.selected())
    } else {
        text
    }
}

fn muted(theme: &Theme) -> Style {
    Style::default().fg(theme.muted)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tickers
// ─────────────────────────────────────────────────────────────────────────────

impl ItemView for TickerData {
    fn header(theme: &Theme) -> Option<Line<'static>> {
        Some(Line::styled(
            format!(
                "{:<6} {:>10} {:>9} {:>9} {:>9}",
                "Ticker", "Price", "Day", "Week", "Year"
            ),
            muted(theme).add_modifier(Modifier::BOLD),
        ))
    }

    fn row(&self, ctx: &RowContext<'_>) -> Text<'static> {
        let theme = ctx.theme;
        let line = Line::from(vec![
            Span::styled(
                format!("{:<6}", self.ticker),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {:>10}", self.price_label())),
            Span::styled(
                format!(" {:>9}", change_label(self.day_change)),
                theme.change(self.day_change),
            ),
            Span::styled(
                format!(" {:>9}", change_label(self.week_change)),
                theme.change(self.week_change),
            ),
            Span::styled(
                format!(" {:>9}", change_label(self.year_change)),
                theme.change(self.year_change),
            ),
        ]);
        finish(Text::from(line), ctx)
    }

    fn card(&self, ctx: &RowContext<'_>) -> Text<'static> {
        let theme = ctx.theme;
        let arrow = match self.day_change {
            Some(c) if c < 0.0 => "▼",
            Some(_) => "▲",
            None => "·",
        };
        let text = Text::from(vec![
            Line::from(vec![
                Span::styled(
                    self.ticker.clone(),
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(self.price_label()),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{} {}", arrow, change_label(self.day_change)),
                    theme.change(self.day_change),
                ),
                Span::styled("  1W ", muted(theme)),
                Span::styled(change_label(self.week_change), theme.change(self.week_change)),
                Span::styled("  1Y ", muted(theme)),
                Span::styled(change_label(self.year_change), theme.change(self.year_change)),
            ]),
        ]);
        finish(text, ctx)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// News
// ─────────────────────────────────────────────────────────────────────────────

impl ItemView for NewsItem {
    fn row(&self, ctx: &RowContext<'_>) -> Text<'static> {
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", self.source),
                Style::default().fg(ctx.theme.highlight),
            ),
            Span::styled(self.title.clone(), Style::default().fg(ctx.theme.fg)),
        ]);
        finish(Text::from(line), ctx)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GitHub
// ─────────────────────────────────────────────────────────────────────────────

impl ItemView for GithubRepo {
    fn row(&self, ctx: &RowContext<'_>) -> Text<'static> {
        let theme = ctx.theme;
        let language_color = self
            .language_rgb()
            .map_or(theme.muted, |(r, g, b)| Color::Rgb(r, g, b));

        let mut first = vec![
            Span::styled(
                self.full_name(),
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ★{}", compact_count(self.stars)), muted(theme)),
            Span::styled(
                format!("  +{} today", self.current_period_stars),
                Style::default().fg(theme.positive),
            ),
        ];
        if !self.language.is_empty() {
            first.push(Span::styled("  ● ", Style::default().fg(language_color)));
            first.push(Span::styled(self.language.clone(), muted(theme)));
        }

        let mut lines = vec![Line::from(first)];
        if !self.description.is_empty() {
            lines.push(Line::styled(format!("  {}", self.description), muted(theme)));
        }
        finish(Text::from(lines), ctx)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hacker News
// ─────────────────────────────────────────────────────────────────────────────

impl ItemView for HnStory {
    fn row(&self, ctx: &RowContext<'_>) -> Text<'static> {
        let theme = ctx.theme;
        let mut first = vec![Span::styled(self.title.clone(), Style::default().fg(theme.fg))];
        if let Some(domain) = self.domain() {
            first.push(Span::styled(format!(" ({})", domain), muted(theme)));
        }

        let meta = Line::styled(
            format!(
                "  {} points by {} {} ago | {} comments",
                self.score,
                self.by,
                self.age_label(ctx.now),
                self.descendants
            ),
            muted(theme),
        );
        finish(Text::from(vec![Line::from(first), meta]), ctx)
    }
}
