//! # market-scout
//!
//! Token market signals, a trader-sentiment classifier and two linear
//! workflows that turn the signals into a readable strategy.
//!
//! ## Workflows
//!
//! ```text
//! market-analysis (five-signal)
//!   fetch-market-sentiment ─▶ compile-context-data ─▶ compile-strategy
//!        Fear & Greed          price · flow · tech ·      report text
//!                              whale (· news)
//!
//! trade-advisor (three-signal)
//!   fetch-market-data ─▶ fetch-market-news ─▶ analyze-sentiment ─▶ recommend-strategy
//!     price + trend         headlines           PnL + notes          template or LLM
//! ```
//!
//! Every fetcher is also a [`scout_core::Tool`], so the same capabilities are
//! reachable by name through a [`scout_core::ToolRegistry`].

pub mod composer;
pub mod config;
pub mod context;
pub mod error;
pub mod feed;
pub mod model;
pub mod pipeline;
pub mod random;
pub mod signals;
pub mod token;

use std::sync::Arc;

use scout_core::ToolRegistry;

pub use config::{ScoutConfig, StrategyMode};
pub use context::{Signal, SignalSet, StrategyContext};
pub use error::{Result, ScoutError};
pub use feed::{HttpMarketFeed, MarketFeed, MockMarketFeed};
pub use model::{Sentiment, SignalResult, UserSentiment};
pub use pipeline::market_analysis::{MarketAnalysisRequest, MarketAnalysisWorkflow, StrategyReport};
pub use pipeline::trade_advisor::{Recommender, TradeAdvisorRequest, TradeAdvisorWorkflow};
pub use random::{RandomSource, SeededRandom};
pub use signals::SignalKit;
pub use token::TokenResolver;

use composer::StrategyBuilderTool;
use pipeline::market_analysis::market_analysis_workflow;
use pipeline::trade_advisor::trade_advisor_workflow;

/// Signal fetchers plus both workflows, wired to one feed and random source
pub struct MarketScout {
    kit: SignalKit,
    market_analysis: MarketAnalysisWorkflow,
    trade_advisor: TradeAdvisorWorkflow,
}

impl MarketScout {
    /// Template recommender; see [`MarketScout::with_recommender`]
    pub fn new(feed: Arc<dyn MarketFeed>, rng: Arc<dyn RandomSource>, config: &ScoutConfig) -> Self {
        let kit = SignalKit::new(feed, rng, config);
        let signals = if config.include_news {
            SignalSet::with_news()
        } else {
            SignalSet::five_signal()
        };
        Self {
            market_analysis: market_analysis_workflow(&kit, signals),
            trade_advisor: trade_advisor_workflow(&kit, Recommender::Template),
            kit,
        }
    }

    #[must_use]
    pub fn with_recommender(mut self, recommender: Recommender) -> Self {
        self.trade_advisor = trade_advisor_workflow(&self.kit, recommender);
        self
    }

    /// Run the five-signal market analysis
    pub async fn analyze(&self, symbol: &str) -> Result<StrategyReport> {
        self.market_analysis
            .run(MarketAnalysisRequest::new(symbol))
            .await
    }

    /// Run the three-signal trade advisor
    pub async fn advise(&self, request: TradeAdvisorRequest) -> Result<StrategyReport> {
        self.trade_advisor.run(request).await
    }

    /// Registry with every signal tool, the classifier and the strategy builder
    pub fn registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        self.kit.register_tools(&mut registry);
        registry.register(StrategyBuilderTool);
        registry
    }

    pub const fn kit(&self) -> &SignalKit {
        &self.kit
    }

    pub const fn market_analysis(&self) -> &MarketAnalysisWorkflow {
        &self.market_analysis
    }

    pub const fn trade_advisor(&self) -> &TradeAdvisorWorkflow {
        &self.trade_advisor
    }
}

/// System prompt for the tool-calling market scout agent
pub const SCOUT_AGENT_PROMPT: &str = r"You are Market Scout, a crypto market assistant.

When the user asks about a token:
- Use `market_sentiment` to gauge overall market mood (Fear & Greed).
- Use `price_performance` for current price, 24h change, high and low.
- Use `capital_flow` for inflows and outflows.
- Use `technical_indicators` for chart patterns.
- Use `whale_accumulation` for large-holder activity.
- Use `news_fetcher` for the latest headlines.
- Finally, use `strategy_builder` with the messages you collected to produce the report.

If the user shares their profit/loss and how they feel, call `get_sentiment` with `pnl` and `notes`.

Only call a tool when its inputs are clear (for example `tokenSymbol`). Call one tool at a time and wait for its result.";

/// System prompt for the LLM strategy recommender
pub const ADVISOR_PROMPT: &str = r"You are a trading assistant. Give an actionable strategy based on market data, news and the trader's own sentiment.

Structure the response exactly as follows:

📈 [Token Symbol] Market Analysis
═══════════════════════════

💹 MARKET SUMMARY
• Price: [$X USD]
• Trend: [Uptrend/Downtrend/Sideways]
• 24h Change: [X%]

📰 RECENT HEADLINES
• [Headline 1]
• [Headline 2]
• [Headline 3]

😎 SENTIMENT ANALYSIS
• Sentiment: [Bullish/Bearish/Neutral]
• Insight: [Brief description of user sentiment or 'No sentiment data provided']

💡 TRADING STRATEGY
• Action: [Buy/Hold/Sell/Avoid]
• Rationale: [Brief explanation based on market data, news, and sentiment]
• Risk Level: [Low/Moderate/High]
• Suggested Timeframe: [Short-term (1-3 days)/Medium-term (1-2 weeks)/Long-term (1+ months)]

Guidelines:
- If sentiment data is available, weigh it heavily in the rationale.
- Otherwise base the strategy on market data and news only.
- Keep descriptions concise and specific to the token.";
