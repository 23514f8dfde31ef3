//! GitHub trending repositories

use super::{FeedItem, FeedKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub username: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubRepo {
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub language_color: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub current_period_stars: u64,
    #[serde(default)]
    pub built_by: Vec<Contributor>,
}

impl GithubRepo {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.author, self.name)
    }

    /// `#rrggbb` language color as RGB, if the backend sent a valid one
    pub fn language_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.language_color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Compact star counts: 950, 1.2k, 34k
pub fn compact_count(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=9_999 => format!("{:.1}k", n as f64 / 1000.0),
        _ => format!("{}k", n / 1000),
    }
}

fn repo(author: &str, name: &str, language: &str, color: &str, stars: u64, today: u64) -> GithubRepo {
    GithubRepo {
        author: author.to_string(),
        name: name.to_string(),
        avatar: String::new(),
        url: format!("https://github.com/{}/{}", author, name),
        description: format!("{} - trending in {}", name, language),
        language: language.to_string(),
        language_color: color.to_string(),
        stars,
        forks: stars / 10,
        current_period_stars: today,
        built_by: vec![Contributor {
            username: author.to_string(),
            href: format!("https://github.com/{}", author),
            avatar: String::new(),
        }],
    }
}

impl FeedItem for GithubRepo {
    const KIND: FeedKind = FeedKind::Github;

    fn mock() -> Vec<Self> {
        vec![
            repo("ratatui", "ratatui", "Rust", "#dea584", 12_400, 85),
            repo("tokio-rs", "tokio", "Rust", "#dea584", 28_100, 42),
            repo("astral-sh", "uv", "Rust", "#dea584", 45_300, 310),
            repo("ollama", "ollama", "Go", "#00ADD8", 98_000, 220),
            repo("vercel", "next.js", "JavaScript", "#f1e05a", 128_000, 95),
            repo("pola-rs", "polars", "Rust", "#dea584", 31_200, 64),
            repo("charmbracelet", "bubbletea", "Go", "#00ADD8", 28_900, 51),
            repo("microsoft", "typescript", "TypeScript", "#3178c6", 101_000, 38),
        ]
    }

    fn link(&self) -> Option<String> {
        Some(self.url.clone())
    }

    fn summary(&self) -> String {
        format!(
            "{} ({}) ★{} +{} today",
            self.full_name(),
            if self.language.is_empty() { "?" } else { self.language.as_str() },
            compact_count(self.stars),
            self.current_period_stars
        )
    }
}
