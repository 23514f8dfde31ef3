//! Feed panel - one feed query driving one or two paginated views
//!
//! The panel owns the query handle and the paging controllers. Each UI tick
//! it copies the latest snapshot, lets the active controller reconcile and
//! fire its timers, and keeps the row cursor inside the current page.
//!
//! A panel with a card layout runs two controllers over one shared page
//! index, so switching layouts keeps the reader's place. Only the visible
//! controller is observed; the hidden one is suspended so its rotation does
//! not advance the shared page a second time.

use super::components::controls;
use super::items::{ItemView, RowContext};
use super::theme::Theme;
use crate::config::{ControlsVariant, PanelConfig};
use crate::feeds::FeedKind;
use crate::fetch::{FeedQuery, FetchSnapshot, FetchTrigger};
use crate::paging::{
    NavAction, PaginatedListController, PaginationState, PagingError, Presentation, SharedPage,
};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Time inputs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Monotonic time driving paging timers
    pub now: Instant,
    /// Wall clock for "updated 12s ago" labels
    pub wall: DateTime<Utc>,
    /// Animation frame counter for spinners
    pub frame: usize,
}

impl Clock {
    pub fn now(frame: usize) -> Self {
        Self {
            now: Instant::now(),
            wall: Utc::now(),
            frame,
        }
    }

    fn spinner(&self) -> char {
        SPINNER[self.frame % SPINNER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    /// One row per item
    List,
    /// Two-column grid of bordered tiles
    Cards,
}

pub struct FeedPanel<T> {
    kind: FeedKind,
    query: FeedQuery<T>,
    list: PaginatedListController,
    cards: Option<PaginatedListController>,
    layout: PanelLayout,
    controls: ControlsVariant,
    snapshot: FetchSnapshot<T>,
    /// Row within the current page
    cursor: usize,
}

fn active<'a>(
    list: &'a mut PaginatedListController,
    cards: &'a mut Option<PaginatedListController>,
    layout: PanelLayout,
) -> &'a mut PaginatedListController {
    match (layout, cards) {
        (PanelLayout::Cards, Some(cards)) => cards,
        _ => list,
    }
}

impl<T: ItemView> FeedPanel<T> {
    /// List-only panel owning its page index
    pub fn new(
        kind: FeedKind,
        query: FeedQuery<T>,
        panel: &PanelConfig,
        transition: Duration,
    ) -> Result<Self, PagingError> {
        let list = PaginatedListController::new(panel.controller_config(transition)?)?;
        Ok(Self::assemble(kind, query, panel.controls, list, None))
    }

    /// Panel with list and card layouts sharing one page index
    pub fn with_cards(
        kind: FeedKind,
        query: FeedQuery<T>,
        panel: &PanelConfig,
        transition: Duration,
    ) -> Result<Self, PagingError> {
        let config = panel.controller_config(transition)?;
        let page = SharedPage::default();
        let list = PaginatedListController::with_external_page(config, page.clone())?;
        let cards = PaginatedListController::with_external_page(config, page)?;
        Ok(Self::assemble(kind, query, panel.controls, list, Some(cards)))
    }

    fn assemble(
        kind: FeedKind,
        query: FeedQuery<T>,
        controls: ControlsVariant,
        list: PaginatedListController,
        cards: Option<PaginatedListController>,
    ) -> Self {
        Self {
            kind,
            query,
            list,
            cards,
            layout: PanelLayout::List,
            controls,
            snapshot: FetchSnapshot::loading(),
            cursor: 0,
        }
    }

    fn controller(&self) -> &PaginatedListController {
        match (self.layout, &self.cards) {
            (PanelLayout::Cards, Some(cards)) => cards,
            _ => &self.list,
        }
    }

    fn controller_mut(&mut self) -> &mut PaginatedListController {
        active(&mut self.list, &mut self.cards, self.layout)
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn snapshot(&self) -> &FetchSnapshot<T> {
        &self.snapshot
    }

    pub fn state(&self) -> PaginationState {
        self.controller().state()
    }

    /// Pull the latest snapshot and fire due timers
    ///
    /// Returns true when the visible page or animation changed.
    pub fn sync(&mut self, now: Instant) -> bool {
        self.snapshot = self.query.snapshot();
        let before = self.controller().current_page();

        let snapshot = &self.snapshot;
        let controller = active(&mut self.list, &mut self.cards, self.layout);
        controller.observe(snapshot, now);
        let changed = controller.poll(now);

        if self.controller().current_page() != before {
            self.cursor = 0;
        }
        self.clamp_cursor();
        changed
    }

    pub fn navigate(&mut self, action: NavAction, now: Instant) -> bool {
        let moved = self.controller_mut().navigate(action, now);
        if moved {
            self.cursor = 0;
        }
        moved
    }

    fn page_len(&self) -> usize {
        self.snapshot
            .items()
            .map_or(0, |items| self.controller().current_slice(items).items.len())
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    /// Move the row cursor, staying inside the current page
    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = self.cursor.saturating_add_signed(delta);
        self.clamp_cursor();
    }

    pub fn selected(&self) -> Option<&T> {
        let items = self.snapshot.items()?;
        self.controller().current_slice(items).items.get(self.cursor)
    }

    /// Switch between list and cards; false when the panel has no cards
    pub fn toggle_layout(&mut self, now: Instant) -> bool {
        if self.cards.is_none() {
            return false;
        }
        self.controller_mut().suspend();
        self.layout = match self.layout {
            PanelLayout::List => PanelLayout::Cards,
            PanelLayout::Cards => PanelLayout::List,
        };
        let snapshot = &self.snapshot;
        active(&mut self.list, &mut self.cards, self.layout).observe(snapshot, now);
        self.clamp_cursor();
        tracing::debug!(feed = %self.kind, layout = ?self.layout, "layout toggled");
        true
    }

    pub fn trigger(&self, trigger: FetchTrigger) {
        self.query.trigger(trigger);
    }

    /// Release the query task and all paging timers
    pub fn dispose(&mut self) {
        self.query.dispose();
        self.list.dispose();
        if let Some(cards) = &mut self.cards {
            cards.dispose();
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    fn title(&self, state: PaginationState, clock: &Clock) -> Line<'static> {
        let mut spans = vec![Span::raw(format!(" {}", self.kind.title()))];
        if let Some(direction) = state.direction {
            spans.push(Span::raw(format!(" {}", direction.arrow())));
        }
        if self.snapshot.is_fetching {
            spans.push(Span::raw(format!(" {}", clock.spinner())));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme, clock: &Clock) {
        let state = self.state();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(focused))
            .title(self.title(state, clock));
        if let Some(age) = self.snapshot.age_label(clock.wall) {
            block = block.title_top(
                Line::styled(format!(" {} ", age), Style::default().fg(theme.muted))
                    .right_aligned(),
            );
        }
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cursor = self.cursor;
        let layout = self.layout;
        let variant = self.controls;
        let snapshot = &self.snapshot;
        let controller = active(&mut self.list, &mut self.cards, self.layout);

        let mut index = 0;
        let presentation = controller.render(
            snapshot,
            clock.now,
            |item: &T| {
                let ctx = RowContext {
                    theme,
                    selected: focused && index == cursor,
                    now: clock.wall,
                };
                index += 1;
                match layout {
                    PanelLayout::List => item.row(&ctx),
                    PanelLayout::Cards => item.card(&ctx),
                }
            },
            |nav| Text::from(controls::render(variant, nav, theme)),
        );

        match presentation {
            Presentation::Loading => render_placeholder(
                f,
                inner,
                theme,
                &format!("{} Loading {}…", clock.spinner(), self.kind.title()),
                None,
            ),
            Presentation::Empty => {
                let hint = if self.snapshot.is_error() {
                    "Unable to fetch data. Please try again later."
                } else {
                    "Nothing to show yet."
                };
                render_placeholder(f, inner, theme, "No data available", Some(hint));
            }
            Presentation::Populated {
                items,
                controls,
                transition,
            } => {
                let header = match layout {
                    PanelLayout::List => T::header(theme),
                    PanelLayout::Cards => None,
                };
                let [header_area, body_area, controls_area] = Layout::vertical([
                    Constraint::Length(u16::from(header.is_some())),
                    Constraint::Min(1),
                    Constraint::Length(u16::from(controls.is_some())),
                ])
                .areas(inner);

                if let Some(header) = header {
                    f.render_widget(Paragraph::new(header), header_area);
                }

                // Dimmed while a page change is animating
                let body_style = if transition.is_some() {
                    Style::default().add_modifier(Modifier::DIM)
                } else {
                    Style::default()
                };
                match layout {
                    PanelLayout::List => render_rows(f, body_area, items, body_style),
                    PanelLayout::Cards => render_cards(f, body_area, items, body_style, theme),
                }

                if let Some(controls) = controls {
                    f.render_widget(Paragraph::new(controls), controls_area);
                }
            }
        }
    }
}

fn render_placeholder(f: &mut Frame, area: Rect, theme: &Theme, headline: &str, hint: Option<&str>) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(headline.to_string(), Style::default().fg(theme.fg)).centered(),
    ];
    if let Some(hint) = hint {
        lines.push(Line::styled(hint.to_string(), Style::default().fg(theme.muted)).centered());
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_rows(f: &mut Frame, area: Rect, items: Vec<Text<'static>>, style: Style) {
    let lines: Vec<Line<'static>> = items.into_iter().flat_map(|text| text.lines).collect();
    f.render_widget(Paragraph::new(lines).style(style), area);
}

fn render_cards(f: &mut Frame, area: Rect, items: Vec<Text<'static>>, style: Style, theme: &Theme) {
    let rows = items.len().div_ceil(2);
    if rows == 0 {
        return;
    }
    let card_height = items.iter().map(|t| t.height()).max().unwrap_or(1) as u16 + 2;
    let row_areas = Layout::vertical(vec![Constraint::Length(card_height); rows]).split(area);

    let mut items = items.into_iter();
    for row_area in row_areas.iter() {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(*row_area);
        for cell in [left, right] {
            let Some(text) = items.next() else {
                return;
            };
            let card = Paragraph::new(text).style(style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.border)),
            );
            f.render_widget(card, cell);
        }
    }
}
