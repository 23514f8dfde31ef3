//! Hacker News top stories

use super::{FeedItem, FeedKind};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnStory {
    #[serde(default)]
    pub by: String,
    /// Comment count
    #[serde(default)]
    pub descendants: u32,
    pub id: u64,
    #[serde(default)]
    pub score: u32,
    /// Unix seconds
    #[serde(default)]
    pub time: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Self posts (Ask HN) have no URL
    #[serde(default)]
    pub url: String,
}

impl HnStory {
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }

    /// Story domain for display, e.g. `github.com`
    pub fn domain(&self) -> Option<&str> {
        let rest = self.url.split_once("://")?.1;
        let host = rest.split('/').next()?;
        Some(host.strip_prefix("www.").unwrap_or(host)).filter(|h| !h.is_empty())
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.time, 0).single()
    }

    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let Some(posted) = self.posted_at() else {
            return "?".to_string();
        };
        let mins = (now - posted).num_minutes().max(0);
        if mins < 60 {
            format!("{}m", mins)
        } else if mins < 24 * 60 {
            format!("{}h", mins / 60)
        } else {
            format!("{}d", mins / (24 * 60))
        }
    }
}

impl FeedItem for HnStory {
    const KIND: FeedKind = FeedKind::HackerNews;

    fn mock() -> Vec<Self> {
        let now = Utc::now().timestamp();
        let titles = [
            ("Show HN: A terminal dashboard for markets and news", "github.com/example/dash", 412),
            ("The design of a lock-free ring buffer", "example.org/ring", 287),
            ("Ask HN: How do you keep up with papers?", "", 198),
            ("SQLite as an application file format, revisited", "sqlite.org/appfileformat.html", 356),
            ("Writing a TCP stack from scratch", "example.com/tcp", 241),
            ("Why we moved our build system to Nix", "example.dev/nix", 176),
            ("A visual guide to exponential backoff", "example.net/backoff", 133),
            ("The unreasonable effectiveness of plain text", "example.io/plaintext", 502),
            ("Launch HN: A faster CI cache", "example.ci", 98),
            ("How rotating displays work", "example.com/rotate", 64),
        ];
        titles
            .iter()
            .enumerate()
            .map(|(i, (title, path, score))| HnStory {
                by: format!("user{}", i + 1),
                descendants: score / 3,
                id: 40_000_000 + i as u64,
                score: *score,
                time: now - (i as i64 + 1) * 1800,
                title: title.to_string(),
                kind: "story".to_string(),
                url: if path.is_empty() {
                    String::new()
                } else {
                    format!("https://{}", path)
                },
            })
            .collect()
    }

    fn link(&self) -> Option<String> {
        if self.url.is_empty() {
            Some(self.discussion_url())
        } else {
            Some(self.url.clone())
        }
    }

    fn summary(&self) -> String {
        match self.domain() {
            Some(domain) => format!(
                "{} ({}) {} points, {} comments",
                self.title, domain, self.score, self.descendants
            ),
            None => format!(
                "{} {} points, {} comments",
                self.title, self.score, self.descendants
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn story(url: &str) -> HnStory {
        HnStory {
            by: "pg".to_string(),
            descendants: 3,
            id: 1,
            score: 10,
            time: 1_700_000_000,
            title: "Title".to_string(),
            kind: "story".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_deserialize_type_field_and_missing_url() {
        let json = r#"[{"by":"pg","descendants":0,"id":8863,"score":104,"time":1175714200,"title":"My YC app","type":"story"}]"#;
        let stories: Vec<HnStory> = serde_json::from_str(json).unwrap();
        assert_eq!(stories[0].kind, "story");
        assert!(stories[0].url.is_empty());
        assert_eq!(
            stories[0].link().as_deref(),
            Some("https://news.ycombinator.com/item?id=8863")
        );
    }

    #[test]
    fn test_domain() {
        assert_eq!(story("https://www.github.com/a/b").domain(), Some("github.com"));
        assert_eq!(story("http://example.org").domain(), Some("example.org"));
        assert_eq!(story("").domain(), None);
    }

    #[test]
    fn test_age_label() {
        let s = story("");
        let posted = s.posted_at().unwrap();
        assert_eq!(s.age_label(posted + Duration::minutes(5)), "5m");
        assert_eq!(s.age_label(posted + Duration::hours(3)), "3h");
        assert_eq!(s.age_label(posted + Duration::days(2)), "2d");
    }
}
