//! HTTP market feed
//!
//! Read-only JSON calls, no authentication, no retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{
    CoinDetailResponse, CoinMarket, FearGreedEntry, FearGreedResponse, MarketFeed,
    SimplePrice, SimplePriceResponse, StatusUpdate, StatusUpdatesResponse,
};
use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};

const USER_AGENT: &str = concat!("market-scout/", env!("CARGO_PKG_VERSION"));

pub struct HttpMarketFeed {
    client: Client,
    coingecko_url: String,
    fear_greed_url: String,
}

impl HttpMarketFeed {
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            coingecko_url: config.coingecko_url.trim_end_matches('/').to_string(),
            fear_greed_url: config.fear_greed_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        tracing::debug!(%url, "Fetching market data");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Upstream(format!("{url} returned {status}")));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketFeed for HttpMarketFeed {
    async fn simple_price(&self, id: &str) -> Result<Option<SimplePrice>> {
        let url = format!("{}/simple/price", self.coingecko_url);
        let mut prices: SimplePriceResponse = self
            .get_json(
                &url,
                &[
                    ("ids", id),
                    ("vs_currencies", "usd"),
                    ("include_24hr_change", "true"),
                ],
            )
            .await?;
        Ok(prices.remove(id))
    }

    async fn coin_market(&self, id: &str) -> Result<CoinMarket> {
        let url = format!("{}/coins/{id}", self.coingecko_url);
        let detail: CoinDetailResponse = self.get_json(&url, &[]).await?;
        Ok(detail.market_data)
    }

    async fn fear_greed(&self) -> Result<FearGreedEntry> {
        let url = format!("{}/fng/", self.fear_greed_url);
        let index: FearGreedResponse = self.get_json(&url, &[("limit", "1")]).await?;
        index
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::Upstream("Fear & Greed index returned no data".into()))
    }

    async fn status_updates(&self, id: &str) -> Result<Vec<StatusUpdate>> {
        let url = format!("{}/coins/{id}/status_updates", self.coingecko_url);
        tracing::debug!(%url, "Fetching status updates");
        let response = self.client.get(&url).send().await?;

        // Unknown coins answer 404 with an error body: treat as "no updates"
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ScoutError::Upstream(format!("{url} returned {status}")));
        }

        let updates: StatusUpdatesResponse = response.json().await?;
        Ok(updates.status_updates)
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes_from_base_urls() {
        let config = ScoutConfig {
            coingecko_url: "https://api.coingecko.com/api/v3/".into(),
            fear_greed_url: "https://api.alternative.me/".into(),
            ..ScoutConfig::default()
        };
        let feed = HttpMarketFeed::new(&config).unwrap();
        assert_eq!(feed.coingecko_url, "https://api.coingecko.com/api/v3");
        assert_eq!(feed.fear_greed_url, "https://api.alternative.me");
        assert_eq!(feed.name(), "CoinGecko");
    }
}
