//! Price with 24h change and range (`price_performance`)

use async_trait::async_trait;
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::error::Result;
use crate::feed::MarketFeed;
use crate::model::PricePerformance;
use crate::token::TokenResolver;

#[derive(Clone)]
pub struct PricePerformanceFetcher {
    feed: Arc<dyn MarketFeed>,
    resolver: TokenResolver,
}

impl PricePerformanceFetcher {
    pub const TOOL: &'static str = "price_performance";

    pub fn new(feed: Arc<dyn MarketFeed>) -> Self {
        Self {
            feed,
            resolver: TokenResolver::core(),
        }
    }

    #[must_use]
    pub const fn with_resolver(mut self, resolver: TokenResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub async fn fetch(&self, symbol: &str) -> Result<PricePerformance> {
        let id = self.resolver.resolve(symbol);
        tracing::debug!(%symbol, %id, "Fetching price performance");

        let market = self.feed.coin_market(&id).await?;
        Ok(PricePerformance::new(
            symbol,
            market.current_price.usd,
            market.price_change_percentage_24h.unwrap_or_default(),
            market.high_24h.usd,
            market.low_24h.usd,
        ))
    }
}

#[async_trait]
impl Tool for PricePerformanceFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Price, 24h change and 24h high/low for a token.".into(),
            parameters: vec![symbol_param()],
            category: Some("market_data".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch(call.str_arg(SYMBOL_PARAM)?).await?;
        signal_output(Self::TOOL, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::feed::MockMarketFeed;

    #[tokio::test]
    async fn formats_range() {
        let fetcher = PricePerformanceFetcher::new(Arc::new(MockMarketFeed::new()));
        let btc = fetcher.fetch("BTC").await.unwrap();
        assert_eq!(
            btc.message,
            "Price: $97500.00, 24h Change: 2.50%, High: $98200, Low: $94800"
        );
    }

    #[tokio::test]
    async fn core_table_does_not_know_layer_twos() {
        // "ARB" falls back to "arb", which the feed does not carry
        let fetcher = PricePerformanceFetcher::new(Arc::new(MockMarketFeed::new()));
        assert!(matches!(fetcher.fetch("ARB").await, Err(ScoutError::Upstream(_))));

        let extended = fetcher.with_resolver(TokenResolver::extended());
        assert!(extended.fetch("ARB").await.is_ok());
    }
}
