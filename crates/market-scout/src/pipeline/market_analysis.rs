//! Five-signal market analysis
//!
//! `fetch-market-sentiment` → `compile-context-data` → `compile-strategy`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Checked, Step, Then, Validate, Workflow, non_blank};
use crate::composer::compose;
use crate::context::{Signal, SignalSet, StrategyContext};
use crate::error::Result;
use crate::model::SentimentIndex;
use crate::signals::{SentimentIndexFetcher, SignalKit};

pub const WORKFLOW_ID: &str = "market-analysis";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysisRequest {
    pub token_symbol: String,
}

impl MarketAnalysisRequest {
    pub fn new(token_symbol: impl Into<String>) -> Self {
        Self {
            token_symbol: token_symbol.into(),
        }
    }
}

impl Validate for MarketAnalysisRequest {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("tokenSymbol", &self.token_symbol)
    }
}

/// Market-wide reading carried forward with the requested symbol
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReading {
    pub token_symbol: String,
    pub sentiment: SentimentIndex,
}

impl Validate for SentimentReading {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("tokenSymbol", &self.token_symbol)?;
        non_blank("sentiment.message", &self.sentiment.message)
    }
}

/// Final rendered strategy
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub symbol: String,
    pub strategy: String,
    pub generated_at: DateTime<Utc>,
}

impl StrategyReport {
    pub fn new(symbol: &str, strategy: String) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            strategy,
            generated_at: Utc::now(),
        }
    }
}

impl Validate for StrategyReport {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("strategy", &self.strategy)
    }
}

pub struct FetchMarketSentiment {
    fetcher: SentimentIndexFetcher,
}

#[async_trait]
impl Step for FetchMarketSentiment {
    type Input = MarketAnalysisRequest;
    type Output = SentimentReading;

    fn id(&self) -> &'static str {
        "fetch-market-sentiment"
    }

    async fn run(&self, input: MarketAnalysisRequest) -> Result<SentimentReading> {
        Ok(SentimentReading {
            sentiment: self.fetcher.fetch().await?,
            token_symbol: input.token_symbol,
        })
    }
}

/// Fetches the remaining configured signals one after another
pub struct CompileContextData {
    kit: SignalKit,
    signals: SignalSet,
}

#[async_trait]
impl Step for CompileContextData {
    type Input = SentimentReading;
    type Output = StrategyContext;

    fn id(&self) -> &'static str {
        "compile-context-data"
    }

    async fn run(&self, input: SentimentReading) -> Result<StrategyContext> {
        let symbol = input.token_symbol.as_str();
        let mut context = StrategyContext::new(symbol, self.signals.clone())
            .with(Signal::MarketSentiment, input.sentiment.message);

        for signal in self.signals.iter() {
            let message = match signal {
                Signal::MarketSentiment => continue,
                Signal::PricePerformance => self.kit.price_performance.fetch(symbol).await?.message,
                Signal::CapitalFlow => self.kit.capital_flow.fetch(symbol).message,
                Signal::Technical => self.kit.technical.fetch(symbol).message,
                Signal::Whale => self.kit.whale.fetch(symbol).message,
                Signal::News => self.kit.news.fetch(symbol).await?.message(),
            };
            context = context.with(signal, message);
        }
        Ok(context)
    }
}

pub struct CompileStrategy;

#[async_trait]
impl Step for CompileStrategy {
    type Input = StrategyContext;
    type Output = StrategyReport;

    fn id(&self) -> &'static str {
        "compile-strategy"
    }

    async fn run(&self, input: StrategyContext) -> Result<StrategyReport> {
        Ok(StrategyReport::new(&input.symbol, compose(&input)))
    }
}

pub type MarketAnalysisWorkflow = Workflow<
    Then<Then<Checked<FetchMarketSentiment>, Checked<CompileContextData>>, Checked<CompileStrategy>>,
>;

pub fn market_analysis_workflow(kit: &SignalKit, signals: SignalSet) -> MarketAnalysisWorkflow {
    Workflow::new(
        WORKFLOW_ID,
        FetchMarketSentiment {
            fetcher: kit.sentiment_index.clone(),
        },
    )
    .then(CompileContextData {
        kit: kit.clone(),
        signals,
    })
    .then(CompileStrategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::feed::{FeedEndpoint, MockMarketFeed};
    use crate::signals::testing::kit;

    const SECTION_HEADERS: [&str; 6] = [
        "🧠 MARKET SENTIMENT",
        "💹 PRICE PERFORMANCE",
        "💸 CAPITAL FLOW",
        "📊 TECHNICAL INDICATORS",
        "🐋 WHALE ACCUMULATION",
        "💡 STRATEGY",
    ];

    #[tokio::test]
    async fn five_signal_report_for_btc() {
        let workflow = market_analysis_workflow(&kit(MockMarketFeed::new(), &[0.4, 0.2, 0.9]), SignalSet::default());
        assert_eq!(
            workflow.steps(),
            vec!["fetch-market-sentiment", "compile-context-data", "compile-strategy"]
        );

        let report = workflow.run(MarketAnalysisRequest::new("BTC")).await.unwrap();
        assert_eq!(report.symbol, "BTC");
        assert!(report.strategy.starts_with("📈 BTC Market Analysis"));

        let positions: Vec<usize> = SECTION_HEADERS
            .iter()
            .map(|h| report.strategy.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(report.strategy.contains("state of Greed (72/100)"));
        assert!(report.strategy.contains("Strong interest in BTC with $2000000 net inflow."));
        assert!(report.strategy.contains("Whales are actively accumulating BTC."));
        assert!(!report.strategy.contains("RECENT HEADLINES"));
    }

    #[tokio::test]
    async fn lower_case_symbol_is_upper_cased_in_title() {
        let workflow = market_analysis_workflow(&kit(MockMarketFeed::new(), &[0.5]), SignalSet::default());
        let report = workflow.run(MarketAnalysisRequest::new("eth")).await.unwrap();
        assert!(report.strategy.starts_with("📈 ETH Market Analysis"));
    }

    #[tokio::test]
    async fn news_is_opt_in() {
        let workflow = market_analysis_workflow(&kit(MockMarketFeed::new(), &[0.5]), SignalSet::with_news());
        let report = workflow.run(MarketAnalysisRequest::new("BTC")).await.unwrap();
        assert!(report.strategy.contains("📰 RECENT HEADLINES\n• Spot ETF inflows extend weekly streak"));
    }

    #[tokio::test]
    async fn failed_fetch_aborts_without_report() {
        let feed = MockMarketFeed::new().failing(FeedEndpoint::CoinMarket);
        let workflow = market_analysis_workflow(&kit(feed, &[0.5]), SignalSet::default());
        let err = workflow.run(MarketAnalysisRequest::new("BTC")).await.unwrap_err();
        assert!(matches!(err, ScoutError::Upstream(_)));
    }

    #[tokio::test]
    async fn failed_sentiment_aborts_first_step() {
        let feed = MockMarketFeed::new().failing(FeedEndpoint::FearGreed);
        let workflow = market_analysis_workflow(&kit(feed, &[0.5]), SignalSet::default());
        assert!(workflow.run(MarketAnalysisRequest::new("BTC")).await.is_err());
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected() {
        let workflow = market_analysis_workflow(&kit(MockMarketFeed::new(), &[0.5]), SignalSet::default());
        let err = workflow.run(MarketAnalysisRequest::new("  ")).await.unwrap_err();
        assert!(matches!(err, ScoutError::Schema { .. }));
    }
}
