//! Signal fetchers
//!
//! Each fetcher has a typed `fetch` used by the workflows and implements
//! [`scout_core::Tool`] so the same capability can be called by name through
//! the registry.

mod capital_flow;
mod news;
mod price_performance;
mod price_trend;
mod sentiment_index;
mod technical;
mod user_sentiment;
mod whale;

pub use capital_flow::CapitalFlowFetcher;
pub use news::NewsFetcher;
pub use price_performance::PricePerformanceFetcher;
pub use price_trend::PriceTrendFetcher;
pub use sentiment_index::SentimentIndexFetcher;
pub use technical::TechnicalFetcher;
pub use user_sentiment::{UserSentimentTool, classify};
pub use whale::WhaleFetcher;

use std::sync::Arc;

use scout_core::{ParamType, ParameterSchema, ToolRegistry, ToolResult};

use crate::config::ScoutConfig;
use crate::feed::MarketFeed;
use crate::model::SignalResult;
use crate::random::RandomSource;

/// Argument name every per-token tool takes
pub const SYMBOL_PARAM: &str = "tokenSymbol";

pub(crate) fn symbol_param() -> ParameterSchema {
    ParameterSchema::required(SYMBOL_PARAM, ParamType::String, "Token ticker, e.g. BTC, ETH, SOL")
}

/// Tool output: the record's message plus the tagged record as data
pub(crate) fn signal_output(tool: &str, record: impl Into<SignalResult>) -> scout_core::Result<ToolResult> {
    let record = record.into();
    Ok(ToolResult::success(tool, record.message()).with_data(serde_json::to_value(&record)?))
}

/// Every fetcher wired to one feed and one random source
#[derive(Clone)]
pub struct SignalKit {
    pub sentiment_index: SentimentIndexFetcher,
    pub price_trend: PriceTrendFetcher,
    pub price_performance: PricePerformanceFetcher,
    pub capital_flow: CapitalFlowFetcher,
    pub technical: TechnicalFetcher,
    pub whale: WhaleFetcher,
    pub news: NewsFetcher,
}

impl SignalKit {
    pub fn new(feed: Arc<dyn MarketFeed>, rng: Arc<dyn RandomSource>, config: &ScoutConfig) -> Self {
        Self {
            sentiment_index: SentimentIndexFetcher::new(Arc::clone(&feed)),
            price_trend: PriceTrendFetcher::new(Arc::clone(&feed)),
            price_performance: PricePerformanceFetcher::new(Arc::clone(&feed)),
            capital_flow: CapitalFlowFetcher::new(Arc::clone(&rng)),
            technical: TechnicalFetcher,
            whale: WhaleFetcher::new(rng),
            news: NewsFetcher::new(feed, config.headline_limit),
        }
    }

    /// Register every signal tool plus the sentiment classifier
    pub fn register_tools(&self, registry: &mut ToolRegistry) {
        registry.register(self.sentiment_index.clone());
        registry.register(self.price_trend.clone());
        registry.register(self.price_performance.clone());
        registry.register(self.capital_flow.clone());
        registry.register(self.technical);
        registry.register(self.whale.clone());
        registry.register(self.news.clone());
        registry.register(UserSentimentTool);
    }
}
