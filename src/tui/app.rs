// TUI application state
//
// Four feed panels in a 2x2 grid, the focused panel, the toast overlay and
// the log buffer shown in the footer. Key handling in mod.rs translates
// input into the actions below; nothing here touches the terminal.

use super::clipboard;
use super::panel::{Clock, FeedPanel};
use super::theme::Theme;
use super::components::toast::Toast;
use crate::config::Config;
use crate::feeds::{
    market_sentiment, FeedClient, FeedItem, FeedKind, GithubRepo, HnStory, NewsItem, Sentiment,
    TickerData,
};
use crate::fetch::FetchTrigger;
use crate::logging::LogBuffer;
use crate::paging::NavAction;
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

pub struct App {
    pub tickers: FeedPanel<TickerData>,
    pub news: FeedPanel<NewsItem>,
    pub github: FeedPanel<GithubRepo>,
    pub hackernews: FeedPanel<HnStory>,

    /// Panel receiving navigation keys
    pub focused: FeedKind,

    pub should_quit: bool,

    pub toast: Option<Toast>,

    pub log_buffer: LogBuffer,

    pub theme: Theme,

    pub demo_mode: bool,

    /// Spinner frame, advanced every tick
    frame: usize,
}

impl App {
    /// Build all panels and start their feed queries
    ///
    /// Must run inside a tokio runtime. Fails when a panel's paging settings
    /// are invalid (zero page size, zero rotation interval).
    pub fn new(config: &Config, client: &FeedClient, log_buffer: LogBuffer) -> Result<Self> {
        let transition = Duration::from_millis(config.transition_ms);
        let panels = &config.panels;

        let query = |kind: FeedKind| panels.get(kind).fetch_policy(kind);

        let tickers = FeedPanel::with_cards(
            FeedKind::Tickers,
            client.query::<TickerData>(query(FeedKind::Tickers)),
            &panels.tickers,
            transition,
        )
        .context("Invalid [panels.tickers] settings")?;
        let news = FeedPanel::new(
            FeedKind::News,
            client.query::<NewsItem>(query(FeedKind::News)),
            &panels.news,
            transition,
        )
        .context("Invalid [panels.news] settings")?;
        let github = FeedPanel::new(
            FeedKind::Github,
            client.query::<GithubRepo>(query(FeedKind::Github)),
            &panels.github,
            transition,
        )
        .context("Invalid [panels.github] settings")?;
        let hackernews = FeedPanel::new(
            FeedKind::HackerNews,
            client.query::<HnStory>(query(FeedKind::HackerNews)),
            &panels.hackernews,
            transition,
        )
        .context("Invalid [panels.hackernews] settings")?;

        Ok(Self {
            tickers,
            news,
            github,
            hackernews,
            focused: FeedKind::Tickers,
            should_quit: false,
            toast: None,
            log_buffer,
            theme: Theme::default(),
            demo_mode: client.is_demo(),
            frame: 0,
        })
    }

    pub fn clock(&self) -> Clock {
        Clock::now(self.frame)
    }

    /// Periodic tick: pull snapshots, fire paging timers, expire the toast
    pub fn tick(&mut self, now: Instant) {
        self.frame = self.frame.wrapping_add(1);
        self.tickers.sync(now);
        self.news.sync(now);
        self.github.sync(now);
        self.hackernews.sync(now);

        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        let all = FeedKind::ALL;
        let i = all.iter().position(|&k| k == self.focused).unwrap_or(0);
        self.focused = all[(i + 1) % all.len()];
    }

    pub fn focus_prev(&mut self) {
        let all = FeedKind::ALL;
        let i = all.iter().position(|&k| k == self.focused).unwrap_or(0);
        self.focused = all[(i + all.len() - 1) % all.len()];
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focused-panel actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn navigate(&mut self, action: NavAction, now: Instant) -> bool {
        match self.focused {
            FeedKind::Tickers => self.tickers.navigate(action, now),
            FeedKind::News => self.news.navigate(action, now),
            FeedKind::Github => self.github.navigate(action, now),
            FeedKind::HackerNews => self.hackernews.navigate(action, now),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        match self.focused {
            FeedKind::Tickers => self.tickers.move_cursor(delta),
            FeedKind::News => self.news.move_cursor(delta),
            FeedKind::Github => self.github.move_cursor(delta),
            FeedKind::HackerNews => self.hackernews.move_cursor(delta),
        }
    }

    /// Link of the item under the cursor in the focused panel
    pub fn selected_link(&self) -> Option<String> {
        match self.focused {
            FeedKind::Tickers => self.tickers.selected().and_then(FeedItem::link),
            FeedKind::News => self.news.selected().and_then(FeedItem::link),
            FeedKind::Github => self.github.selected().and_then(FeedItem::link),
            FeedKind::HackerNews => self.hackernews.selected().and_then(FeedItem::link),
        }
    }

    pub fn copy_selected_link(&mut self, now: Instant) {
        let Some(link) = self.selected_link() else {
            self.show_toast("Nothing selected", now);
            return;
        };
        match clipboard::copy_link(&link) {
            Ok(()) => self.show_toast("✓ Link copied", now),
            Err(e) => {
                tracing::warn!("clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy", now);
            }
        }
    }

    /// Refresh the focused feed; a fresh cached result is kept
    pub fn refresh_focused(&mut self) {
        self.trigger(self.focused, FetchTrigger::Refresh);
    }

    /// Refetch every feed now, as after a reconnect
    pub fn reconnect_all(&mut self, now: Instant) {
        for kind in FeedKind::ALL {
            self.trigger(kind, FetchTrigger::Reconnect);
        }
        self.show_toast("Refetching all feeds", now);
    }

    /// Terminal regained focus; forwarded to every feed
    pub fn focus_gained(&mut self) {
        for kind in FeedKind::ALL {
            self.trigger(kind, FetchTrigger::FocusGained);
        }
    }

    fn trigger(&self, kind: FeedKind, trigger: FetchTrigger) {
        match kind {
            FeedKind::Tickers => self.tickers.trigger(trigger),
            FeedKind::News => self.news.trigger(trigger),
            FeedKind::Github => self.github.trigger(trigger),
            FeedKind::HackerNews => self.hackernews.trigger(trigger),
        }
    }

    /// Ticker table <-> cards; other panels ignore the key
    pub fn toggle_ticker_layout(&mut self, now: Instant) -> bool {
        self.tickers.toggle_layout(now)
    }

    pub fn show_toast(&mut self, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast::new(message, now));
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        market_sentiment(self.tickers.snapshot().items()?)
    }

    /// Stop every feed task and paging timer
    pub fn shutdown(&mut self) {
        self.tickers.dispose();
        self.news.dispose();
        self.github.dispose();
        self.hackernews.dispose();
        tracing::debug!("dashboard shut down");
    }
}
