// Feeds - the four data sources shown on the dashboard
//
// Each feed is a flat JSON array served by the backend. The item types know
// nothing about paging; they only describe how to fetch themselves and how
// to summarize one item as a line of text.

pub mod github;
pub mod hackernews;
pub mod news;
pub mod tickers;

pub use github::GithubRepo;
pub use hackernews::HnStory;
pub use news::NewsItem;
pub use tickers::{market_sentiment, Sentiment, TickerData};

use crate::fetch::{FeedQuery, FetchPolicy};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Simulated network latency in demo mode
pub const DEMO_DELAY: Duration = Duration::from_millis(500);

/// Per-request HTTP timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FeedKind {
    Tickers,
    News,
    Github,
    #[value(name = "hackernews", alias = "hn")]
    HackerNews,
}

impl FeedKind {
    pub const ALL: [FeedKind; 4] = [
        FeedKind::Tickers,
        FeedKind::News,
        FeedKind::Github,
        FeedKind::HackerNews,
    ];

    /// Stable key used in config sections and log fields
    pub fn key(self) -> &'static str {
        match self {
            FeedKind::Tickers => "tickers",
            FeedKind::News => "news",
            FeedKind::Github => "github",
            FeedKind::HackerNews => "hackernews",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FeedKind::Tickers => "Markets",
            FeedKind::News => "Tech & Finance News",
            FeedKind::Github => "GitHub Trending",
            FeedKind::HackerNews => "Hacker News",
        }
    }

    /// Backend path, relative to the configured base URL
    pub fn endpoint(self) -> &'static str {
        match self {
            FeedKind::Tickers => "/tickers",
            FeedKind::News => "/news",
            FeedKind::Github => "/github/trending",
            FeedKind::HackerNews => "/hackernews/top",
        }
    }

    /// How often each feed refetches and how long its results stay fresh
    pub fn default_policy(self) -> FetchPolicy {
        let base = FetchPolicy::default();
        match self {
            FeedKind::Tickers => base
                .with_refetch_interval(Some(Duration::from_secs(30)))
                .with_stale_time(Duration::from_secs(25))
                .with_retries(2),
            FeedKind::News => base
                .with_refetch_interval(Some(Duration::from_secs(300)))
                .with_stale_time(Duration::from_secs(240))
                .with_retries(2),
            FeedKind::Github | FeedKind::HackerNews => base
                .with_refetch_interval(Some(Duration::from_secs(300)))
                .with_stale_time(Duration::ZERO)
                .with_retries(3),
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FeedKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tickers" => Ok(FeedKind::Tickers),
            "news" => Ok(FeedKind::News),
            "github" => Ok(FeedKind::Github),
            "hackernews" | "hn" => Ok(FeedKind::HackerNews),
            other => Err(format!("unknown feed '{}'", other)),
        }
    }
}

/// An item type served by one feed
pub trait FeedItem: DeserializeOwned + Send + Sync + 'static {
    const KIND: FeedKind;

    /// Built-in collection served in demo mode
    fn mock() -> Vec<Self>;

    /// URL worth copying for this item, if any
    fn link(&self) -> Option<String>;

    /// One-line plain-text rendering
    fn summary(&self) -> String;
}

/// HTTP client for the backend (or the built-in mocks in demo mode)
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    demo: bool,
}

impl FeedClient {
    pub fn new(base_url: &str, demo: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tickerdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            demo,
        })
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn url_for(&self, kind: FeedKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }

    /// Fetch one feed's full collection
    pub async fn fetch<T: FeedItem>(&self) -> Result<Vec<T>> {
        if self.demo {
            tokio::time::sleep(DEMO_DELAY).await;
            return Ok(T::mock());
        }

        let url = self.url_for(T::KIND);
        tracing::debug!(feed = %T::KIND, %url, "requesting feed");

        let body = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Backend rejected {}", url))?
            .bytes()
            .await
            .with_context(|| format!("Failed to read {} response", url))?;

        let items: Vec<T> = serde_json::from_slice(&body)
            .with_context(|| format!("Invalid {} payload", T::KIND))?;

        Ok(items)
    }

    /// Start a background query for one feed
    pub fn query<T: FeedItem>(&self, policy: FetchPolicy) -> FeedQuery<T> {
        let client = self.clone();
        FeedQuery::spawn(T::KIND.key(), policy, move || {
            let client = client.clone();
            async move { client.fetch::<T>().await }
        })
    }
}
