//! Spot price with 24h trend (`analyze_market`)

use async_trait::async_trait;
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::error::{Result, ScoutError};
use crate::feed::MarketFeed;
use crate::model::PriceTrend;
use crate::token::TokenResolver;

#[derive(Clone)]
pub struct PriceTrendFetcher {
    feed: Arc<dyn MarketFeed>,
    resolver: TokenResolver,
}

impl PriceTrendFetcher {
    pub const TOOL: &'static str = "analyze_market";

    pub fn new(feed: Arc<dyn MarketFeed>) -> Self {
        Self {
            feed,
            resolver: TokenResolver::extended(),
        }
    }

    #[must_use]
    pub const fn with_resolver(mut self, resolver: TokenResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub async fn fetch(&self, symbol: &str) -> Result<PriceTrend> {
        let id = self.resolver.resolve(symbol);
        tracing::debug!(%symbol, %id, feed = self.feed.name(), "Fetching price trend");

        let quote = self
            .feed
            .simple_price(&id)
            .await?
            .ok_or_else(|| ScoutError::NotFound(symbol.to_uppercase()))?;

        Ok(PriceTrend::new(
            symbol,
            quote.usd,
            quote.usd_24h_change.unwrap_or_default(),
        ))
    }
}

#[async_trait]
impl Tool for PriceTrendFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Current USD price, 24h change and trend (Uptrend/Downtrend/Sideways) for a token.".into(),
            parameters: vec![symbol_param()],
            category: Some("market_data".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch(call.str_arg(SYMBOL_PARAM)?).await?;
        signal_output(Self::TOOL, record)
    }
}
