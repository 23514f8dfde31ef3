//! Per-panel paging and fetch settings
//!
//! Each feed gets a `[panels.<feed>]` section. Missing keys fall back to
//! the feed's own defaults, not to a global default.

use crate::feeds::FeedKind;
use crate::fetch::FetchPolicy;
use crate::paging::{ControllerConfig, PagingError, RotationConfig};
use serde::Deserialize;
use std::time::Duration;

/// Page-control style rendered under a panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlsVariant {
    /// "◀ Prev  Page x of y  Next ▶"
    #[default]
    Simple,
    /// One link per page, current highlighted
    Numbered,
}

impl ControlsVariant {
    /// Unknown values fall back to simple
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "numbered" => Self::Numbered,
            _ => Self::Simple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Numbered => "numbered",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Items per page; zero is rejected when the panel is built
    pub page_size: usize,
    pub rotate: bool,
    pub rotate_interval_secs: u64,
    pub controls: ControlsVariant,
    /// 0 disables scheduled refetch
    pub refetch_interval_secs: u64,
    pub stale_secs: u64,
    pub retries: u32,
}

impl PanelConfig {
    pub fn defaults_for(kind: FeedKind) -> Self {
        let policy = kind.default_policy();
        let (rotate, controls) = match kind {
            FeedKind::Tickers | FeedKind::News => (true, ControlsVariant::Simple),
            FeedKind::Github | FeedKind::HackerNews => (false, ControlsVariant::Numbered),
        };

        Self {
            page_size: 5,
            rotate,
            rotate_interval_secs: 15,
            controls,
            refetch_interval_secs: policy.refetch_interval.map_or(0, |d| d.as_secs()),
            stale_secs: policy.stale_time.as_secs(),
            retries: policy.max_retries,
        }
    }

    pub fn from_file(kind: FeedKind, file: Option<FilePanel>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::defaults_for(kind);

        Self {
            page_size: file.page_size.unwrap_or(defaults.page_size),
            rotate: file.rotate.unwrap_or(defaults.rotate),
            rotate_interval_secs: file
                .rotate_interval_secs
                .unwrap_or(defaults.rotate_interval_secs),
            controls: file
                .controls
                .map(|s| ControlsVariant::parse(&s))
                .unwrap_or(defaults.controls),
            refetch_interval_secs: file
                .refetch_interval_secs
                .unwrap_or(defaults.refetch_interval_secs),
            stale_secs: file.stale_secs.unwrap_or(defaults.stale_secs),
            retries: file.retries.unwrap_or(defaults.retries),
        }
    }

    /// Paging settings for this panel's controller
    pub fn controller_config(&self, transition: Duration) -> Result<ControllerConfig, PagingError> {
        if self.page_size == 0 {
            return Err(PagingError::InvalidPageSize(0));
        }
        let rotation = if self.rotate {
            RotationConfig::every(Duration::from_secs(self.rotate_interval_secs))
        } else {
            RotationConfig::disabled()
        };
        Ok(ControllerConfig::new(self.page_size)
            .with_rotation(rotation)
            .with_transition(transition))
    }

    /// Fetch policy: the feed's defaults with this panel's overrides applied
    pub fn fetch_policy(&self, kind: FeedKind) -> FetchPolicy {
        let interval = (self.refetch_interval_secs > 0)
            .then(|| Duration::from_secs(self.refetch_interval_secs));
        kind.default_policy()
            .with_refetch_interval(interval)
            .with_stale_time(Duration::from_secs(self.stale_secs))
            .with_retries(self.retries)
    }
}

/// Panel settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FilePanel {
    pub page_size: Option<usize>,
    pub rotate: Option<bool>,
    pub rotate_interval_secs: Option<u64>,
    pub controls: Option<String>,
    pub refetch_interval_secs: Option<u64>,
    pub stale_secs: Option<u64>,
    pub retries: Option<u32>,
}

/// `[panels.*]` sections
#[derive(Debug, Deserialize, Default)]
pub struct FilePanels {
    pub tickers: Option<FilePanel>,
    pub news: Option<FilePanel>,
    pub github: Option<FilePanel>,
    pub hackernews: Option<FilePanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panels {
    pub tickers: PanelConfig,
    pub news: PanelConfig,
    pub github: PanelConfig,
    pub hackernews: PanelConfig,
}

impl Panels {
    pub fn get(&self, kind: FeedKind) -> &PanelConfig {
        match kind {
            FeedKind::Tickers => &self.tickers,
            FeedKind::News => &self.news,
            FeedKind::Github => &self.github,
            FeedKind::HackerNews => &self.hackernews,
        }
    }

    pub fn from_file(file: Option<FilePanels>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            tickers: PanelConfig::from_file(FeedKind::Tickers, file.tickers),
            news: PanelConfig::from_file(FeedKind::News, file.news),
            github: PanelConfig::from_file(FeedKind::Github, file.github),
            hackernews: PanelConfig::from_file(FeedKind::HackerNews, file.hackernews),
        }
    }
}

impl Default for Panels {
    fn default() -> Self {
        Self::from_file(None)
    }
}
