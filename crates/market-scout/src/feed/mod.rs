//! Market data feeds
//!
//! Abstraction over the outbound REST services: a CoinGecko-style price /
//! coin-detail / status-update API and the alternative.me Fear & Greed index.

mod http;
mod mock;

pub use http::HttpMarketFeed;
pub use mock::{FeedEndpoint, MockMarketFeed};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::Result;

/// Market feed trait (Strategy pattern)
///
/// All lookups take the canonical identifier produced by the token resolver.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Spot price and 24h change; `None` when the id is absent from the price map
    async fn simple_price(&self, id: &str) -> Result<Option<SimplePrice>>;

    /// Coin detail market data (price, change, 24h high/low)
    async fn coin_market(&self, id: &str) -> Result<CoinMarket>;

    /// Latest Fear & Greed reading
    async fn fear_greed(&self) -> Result<FearGreedEntry>;

    /// Recent status updates, newest first
    async fn status_updates(&self, id: &str) -> Result<Vec<StatusUpdate>>;

    fn name(&self) -> &str;
}

// ============================================================================
// Response shapes
// ============================================================================

/// `/simple/price` is keyed by id
pub type SimplePriceResponse = HashMap<String, SimplePrice>;

#[derive(Clone, Debug, Deserialize)]
pub struct SimplePrice {
    pub usd: Decimal,
    #[serde(default)]
    pub usd_24h_change: Option<Decimal>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CoinDetailResponse {
    pub market_data: CoinMarket,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CoinMarket {
    pub current_price: UsdQuote,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
    pub high_24h: UsdQuote,
    pub low_24h: UsdQuote,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UsdQuote {
    pub usd: Decimal,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FearGreedResponse {
    pub data: Vec<FearGreedEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FearGreedEntry {
    /// Score as a decimal string, e.g. "74"
    pub value: String,
    pub value_classification: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusUpdatesResponse {
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
