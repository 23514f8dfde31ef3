//! Aggregated tech and finance headlines

use super::{FeedItem, FeedKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    pub link: String,
}

fn item(source: &str, title: &str, link: &str) -> NewsItem {
    NewsItem {
        source: source.to_string(),
        title: title.to_string(),
        link: link.to_string(),
    }
}

impl FeedItem for NewsItem {
    const KIND: FeedKind = FeedKind::News;

    fn mock() -> Vec<Self> {
        vec![
            item(
                "TechCrunch",
                "Chipmakers rally as data center demand keeps climbing",
                "https://techcrunch.com/",
            ),
            item(
                "Wired",
                "The quiet return of the command line",
                "https://www.wired.com/",
            ),
            item(
                "The Verge",
                "Browser vendors agree on a new extension format",
                "https://www.theverge.com/",
            ),
            item(
                "Ars Technica",
                "Inside the fight over memory-safe firmware",
                "https://arstechnica.com/",
            ),
            item(
                "TechCrunch",
                "Fintech startup raises Series B for real-time settlement",
                "https://techcrunch.com/",
            ),
            item(
                "Wired",
                "What rising bond yields mean for tech valuations",
                "https://www.wired.com/",
            ),
            item(
                "The Verge",
                "A hands-on look at the new mechanical keyboard wave",
                "https://www.theverge.com/",
            ),
            item(
                "Ars Technica",
                "Researchers publish a faster lock-free queue",
                "https://arstechnica.com/",
            ),
            item(
                "TechCrunch",
                "Open source maintainers push for sustainable funding",
                "https://techcrunch.com/",
            ),
            item(
                "Ars Technica",
                "Why terminal dashboards are having a moment",
                "https://arstechnica.com/",
            ),
            item(
                "Wired",
                "Index funds hit a new share of the market",
                "https://www.wired.com/",
            ),
            item(
                "The Verge",
                "Streaming services test ad-supported tiers again",
                "https://www.theverge.com/",
            ),
        ]
    }

    fn link(&self) -> Option<String> {
        (!self.link.is_empty()).then(|| self.link.clone())
    }

    fn summary(&self) -> String {
        format!("[{}] {}", self.source, self.title)
    }
}
