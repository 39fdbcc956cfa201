//! Mock Market Feed
//!
//! Static fixture data for tests and offline demos. Individual endpoints can
//! be switched to fail to exercise abort paths.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};

use super::{CoinMarket, FearGreedEntry, MarketFeed, SimplePrice, StatusUpdate, UsdQuote};
use crate::error::{Result, ScoutError};

/// Feed endpoints that can be made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedEndpoint {
    SimplePrice,
    CoinMarket,
    FearGreed,
    StatusUpdates,
}

#[derive(Clone, Debug)]
struct Quote {
    price: Decimal,
    change_24h: Decimal,
    high_24h: Decimal,
    low_24h: Decimal,
}

/// Mock feed keyed by canonical id
#[derive(Clone, Debug)]
pub struct MockMarketFeed {
    quotes: HashMap<String, Quote>,
    headlines: HashMap<String, Vec<String>>,
    fear_greed: (u8, String),
    failing: HashSet<FeedEndpoint>,
}

impl Default for MockMarketFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketFeed {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            headlines: HashMap::new(),
            fear_greed: (72, "Greed".into()),
            failing: HashSet::new(),
        }
        .with_quote("bitcoin", dec!(97500), dec!(2.5), dec!(98200), dec!(94800))
        .with_quote("ethereum", dec!(3450), dec!(-3.1), dec!(3580), dec!(3390))
        .with_quote("solana", dec!(195), dec!(0.8), dec!(199.5), dec!(190.2))
        .with_quote("arbitrum", dec!(0.82), dec!(-1.2), dec!(0.85), dec!(0.79))
        .with_quote("optimism", dec!(1.95), dec!(4.4), dec!(2.01), dec!(1.83))
        .with_headlines(
            "bitcoin",
            &[
                "Spot ETF inflows extend weekly streak",
                "Hashrate reaches new all-time high",
                "Lightning capacity grows 12% quarter over quarter",
                "Core developers publish release candidate",
            ],
        )
        .with_headlines(
            "ethereum",
            &["Pectra upgrade date confirmed", "Layer-2 fees fall after blob increase"],
        )
    }

    #[must_use]
    pub fn with_quote(
        mut self,
        id: &str,
        price: Decimal,
        change_24h: Decimal,
        high_24h: Decimal,
        low_24h: Decimal,
    ) -> Self {
        self.quotes.insert(
            id.to_string(),
            Quote {
                price,
                change_24h,
                high_24h,
                low_24h,
            },
        );
        self
    }

    #[must_use]
    pub fn with_headlines(mut self, id: &str, titles: &[&str]) -> Self {
        self.headlines
            .insert(id.to_string(), titles.iter().map(|t| (*t).to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_fear_greed(mut self, score: u8, classification: &str) -> Self {
        self.fear_greed = (score, classification.to_string());
        self
    }

    #[must_use]
    pub fn failing(mut self, endpoint: FeedEndpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    fn check(&self, endpoint: FeedEndpoint) -> Result<()> {
        if self.failing.contains(&endpoint) {
            return Err(ScoutError::Upstream(format!("mock {endpoint:?} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketFeed for MockMarketFeed {
    async fn simple_price(&self, id: &str) -> Result<Option<SimplePrice>> {
        self.check(FeedEndpoint::SimplePrice)?;
        Ok(self.quotes.get(id).map(|q| SimplePrice {
            usd: q.price,
            usd_24h_change: Some(q.change_24h),
        }))
    }

    async fn coin_market(&self, id: &str) -> Result<CoinMarket> {
        self.check(FeedEndpoint::CoinMarket)?;
        let quote = self
            .quotes
            .get(id)
            .ok_or_else(|| ScoutError::Upstream(format!("coin '{id}' not found")))?;
        Ok(CoinMarket {
            current_price: UsdQuote { usd: quote.price },
            price_change_percentage_24h: Some(quote.change_24h),
            high_24h: UsdQuote { usd: quote.high_24h },
            low_24h: UsdQuote { usd: quote.low_24h },
        })
    }

    async fn fear_greed(&self) -> Result<FearGreedEntry> {
        self.check(FeedEndpoint::FearGreed)?;
        Ok(FearGreedEntry {
            value: self.fear_greed.0.to_string(),
            value_classification: self.fear_greed.1.clone(),
        })
    }

    async fn status_updates(&self, id: &str) -> Result<Vec<StatusUpdate>> {
        self.check(FeedEndpoint::StatusUpdates)?;
        Ok(self
            .headlines
            .get(id)
            .map(|titles| {
                titles
                    .iter()
                    .map(|title| StatusUpdate {
                        title: title.clone(),
                        description: None,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_fixture_quotes() {
        let feed = MockMarketFeed::new();
        let btc = feed.simple_price("bitcoin").await.unwrap().unwrap();
        assert_eq!(btc.usd, dec!(97500));
        assert!(feed.simple_price("doge").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failing_endpoint_errors() {
        let feed = MockMarketFeed::new().failing(FeedEndpoint::FearGreed);
        assert!(feed.fear_greed().await.is_err());
        assert!(feed.simple_price("bitcoin").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_coin_has_no_updates() {
        let feed = MockMarketFeed::new();
        assert!(feed.status_updates("doge").await.unwrap().is_empty());
        assert_eq!(feed.status_updates("bitcoin").await.unwrap().len(), 4);
    }
}
