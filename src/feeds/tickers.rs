//! Market tickers and the overall sentiment derived from them

use super::{FeedItem, FeedKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One quote row; the backend sends null for numbers it could not fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerData {
    pub ticker: String,
    #[serde(default)]
    pub todays_price: Option<f64>,
    #[serde(default)]
    pub day_change: Option<f64>,
    #[serde(default)]
    pub week_change: Option<f64>,
    #[serde(default)]
    pub year_change: Option<f64>,
}

impl TickerData {
    pub fn price_label(&self) -> String {
        match self.todays_price {
            Some(price) => format!("${:.2}", price),
            None => "n/a".to_string(),
        }
    }

    pub fn quote_url(&self) -> String {
        format!("https://finance.yahoo.com/quote/{}", self.ticker)
    }
}

/// Signed percentage, e.g. `+0.75%`
pub fn change_label(change: Option<f64>) -> String {
    match change {
        Some(c) => format!("{:+.2}%", c),
        None => "n/a".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Bullish,
    Bearish,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => f.write_str("bullish"),
            Sentiment::Bearish => f.write_str("bearish"),
        }
    }
}

/// Bearish when more than half of the tickers are down on the day
///
/// Tickers without a day change count as not down. Returns None for an
/// empty collection.
pub fn market_sentiment(tickers: &[TickerData]) -> Option<Sentiment> {
    if tickers.is_empty() {
        return None;
    }
    let down = tickers
        .iter()
        .filter(|t| t.day_change.is_some_and(|c| c < 0.0))
        .count();
    if down * 2 > tickers.len() {
        Some(Sentiment::Bearish)
    } else {
        Some(Sentiment::Bullish)
    }
}

fn quote(ticker: &str, price: f64, day: f64, week: f64, year: f64) -> TickerData {
    TickerData {
        ticker: ticker.to_string(),
        todays_price: Some(price),
        day_change: Some(day),
        week_change: Some(week),
        year_change: Some(year),
    }
}

impl FeedItem for TickerData {
    const KIND: FeedKind = FeedKind::Tickers;

    fn mock() -> Vec<Self> {
        vec![
            quote("SPY", 478.25, 0.75, 2.15, 24.32),
            quote("QQQ", 424.75, -0.45, 1.85, 55.18),
            quote("VTI", 235.90, 0.55, 1.95, 22.45),
            quote("VT", 98.45, -0.25, 1.15, 18.75),
            quote("SCHD", 76.80, 0.35, 1.45, 15.25),
            quote("REIT", 22.15, -0.85, -1.25, -5.45),
            quote("IAU", 38.90, 0.15, 2.85, 8.75),
        ]
    }

    fn link(&self) -> Option<String> {
        Some(self.quote_url())
    }

    fn summary(&self) -> String {
        format!(
            "{:<6} {:>10}  day {:>8}  week {:>8}  year {:>8}",
            self.ticker,
            self.price_label(),
            change_label(self.day_change),
            change_label(self.week_change),
            change_label(self.year_change),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_nulls() {
        let json = r#"[
            {"ticker":"SPY","todaysPrice":478.25,"dayChange":0.75,"weekChange":2.15,"yearChange":24.32},
            {"ticker":"XYZ","todaysPrice":null,"dayChange":null,"weekChange":null,"yearChange":null},
            {"ticker":"ABC"}
        ]"#;
        let tickers: Vec<TickerData> = serde_json::from_str(json).unwrap();
        assert_eq!(tickers.len(), 3);
        assert_eq!(tickers[0].todays_price, Some(478.25));
        assert_eq!(tickers[1].day_change, None);
        assert_eq!(tickers[2].year_change, None);
        assert_eq!(tickers[1].price_label(), "n/a");
    }

    #[test]
    fn test_change_label() {
        assert_eq!(change_label(Some(0.75)), "+0.75%");
        assert_eq!(change_label(Some(-5.451)), "-5.45%");
        assert_eq!(change_label(None), "n/a");
    }

    #[test]
    fn test_sentiment() {
        assert_eq!(market_sentiment(&[]), None);

        // Mock data: 3 of 7 down
        assert_eq!(market_sentiment(&TickerData::mock()), Some(Sentiment::Bullish));

        let down = |t: &str| quote(t, 1.0, -1.0, 0.0, 0.0);
        let up = |t: &str| quote(t, 1.0, 1.0, 0.0, 0.0);
        assert_eq!(
            market_sentiment(&[down("A"), down("B"), up("C")]),
            Some(Sentiment::Bearish)
        );
        // Exactly half down is not "more than half"
        assert_eq!(
            market_sentiment(&[down("A"), up("B")]),
            Some(Sentiment::Bullish)
        );
    }

    #[test]
    fn test_missing_change_counts_as_not_down() {
        let mut unknown = quote("A", 1.0, 0.0, 0.0, 0.0);
        unknown.day_change = None;
        let down = quote("B", 1.0, -1.0, 0.0, 0.0);
        assert_eq!(market_sentiment(&[unknown, down]), Some(Sentiment::Bullish));
    }
}
