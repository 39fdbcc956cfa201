//! Market-wide Fear & Greed reading (`market_sentiment`)

use async_trait::async_trait;
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{signal_output, symbol_param};
use crate::error::{Result, ScoutError};
use crate::feed::MarketFeed;
use crate::model::SentimentIndex;

#[derive(Clone)]
pub struct SentimentIndexFetcher {
    feed: Arc<dyn MarketFeed>,
}

impl SentimentIndexFetcher {
    pub const TOOL: &'static str = "market_sentiment";

    pub fn new(feed: Arc<dyn MarketFeed>) -> Self {
        Self { feed }
    }

    pub async fn fetch(&self) -> Result<SentimentIndex> {
        tracing::debug!("Fetching Fear & Greed index");
        let entry = self.feed.fear_greed().await?;
        let score = entry.value.trim().parse::<u8>().map_err(|_| {
            ScoutError::Upstream(format!("Fear & Greed value '{}' is not a score", entry.value))
        })?;
        Ok(SentimentIndex::new(score, entry.value_classification))
    }
}

#[async_trait]
impl Tool for SentimentIndexFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "General crypto market sentiment from the Fear & Greed index (market-wide, not token-specific).".into(),
            parameters: vec![symbol_param()],
            category: Some("sentiment".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch().await?;
        signal_output(Self::TOOL, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedEndpoint, MockMarketFeed};

    #[tokio::test]
    async fn reads_latest_entry() {
        let fetcher = SentimentIndexFetcher::new(Arc::new(MockMarketFeed::new()));
        let index = fetcher.fetch().await.unwrap();
        assert_eq!(index.sentiment_score, 72);
        assert_eq!(
            index.message,
            "The market is currently in a state of Greed (72/100)."
        );
    }

    #[tokio::test]
    async fn unavailable_index_fails() {
        let feed = MockMarketFeed::new().failing(FeedEndpoint::FearGreed);
        let fetcher = SentimentIndexFetcher::new(Arc::new(feed));
        assert!(fetcher.fetch().await.is_err());
    }
}
