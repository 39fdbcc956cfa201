//! Three-signal trade advisor
//!
//! `fetch-market-data` → `fetch-market-news` → `analyze-sentiment` →
//! `recommend-strategy`

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use scout_core::provider::collect_text;
use scout_core::{GenerationOptions, LlmProvider, Message};

use super::market_analysis::StrategyReport;
use super::{Checked, Step, Then, Validate, Workflow, non_blank};
use crate::composer::{AdviceSentiment, compose_advice};
use crate::error::Result;
use crate::model::{Headlines, PriceTrend, Sentiment};
use crate::signals::{NewsFetcher, PriceTrendFetcher, SignalKit, classify};
use crate::ADVISOR_PROMPT;

pub const WORKFLOW_ID: &str = "trade-advisor";

pub const NO_SENTIMENT_INSIGHT: &str = "No sentiment data provided";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAdvisorRequest {
    pub token_symbol: String,
    #[serde(default)]
    pub pnl: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TradeAdvisorRequest {
    pub fn new(token_symbol: impl Into<String>) -> Self {
        Self {
            token_symbol: token_symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_feelings(mut self, pnl: Decimal, notes: impl Into<String>) -> Self {
        self.pnl = Some(pnl);
        self.notes = Some(notes.into());
        self
    }

    /// PnL and notes, only when both are present and the notes say something
    pub fn user_input(&self) -> Option<(Decimal, &str)> {
        match (self.pnl, self.notes.as_deref()) {
            (Some(pnl), Some(notes)) if !notes.trim().is_empty() => Some((pnl, notes)),
            _ => None,
        }
    }
}

impl Validate for TradeAdvisorRequest {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("tokenSymbol", &self.token_symbol)
    }
}

/// Price and trend, with the request carried forward
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub request: TradeAdvisorRequest,
    pub market: PriceTrend,
}

impl Validate for MarketSnapshot {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("market.symbol", &self.market.symbol)?;
        non_blank("market.message", &self.market.message)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewsSnapshot {
    pub request: TradeAdvisorRequest,
    pub market: PriceTrend,
    pub news: Headlines,
}

impl Validate for NewsSnapshot {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.news.headlines.is_empty() {
            return Err("news.headlines must not be empty".into());
        }
        Ok(())
    }
}

/// Everything the recommender sees
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub market: PriceTrend,
    pub news: Headlines,
    pub sentiment: Option<Sentiment>,
    pub insight: String,
}

impl Validate for SentimentSnapshot {
    fn validate(&self) -> std::result::Result<(), String> {
        non_blank("insight", &self.insight)
    }
}

pub struct FetchMarketData {
    fetcher: PriceTrendFetcher,
}

#[async_trait]
impl Step for FetchMarketData {
    type Input = TradeAdvisorRequest;
    type Output = MarketSnapshot;

    fn id(&self) -> &'static str {
        "fetch-market-data"
    }

    async fn run(&self, input: TradeAdvisorRequest) -> Result<MarketSnapshot> {
        let market = self.fetcher.fetch(&input.token_symbol).await?;
        Ok(MarketSnapshot {
            request: input,
            market,
        })
    }
}

pub struct FetchMarketNews {
    fetcher: NewsFetcher,
}

#[async_trait]
impl Step for FetchMarketNews {
    type Input = MarketSnapshot;
    type Output = NewsSnapshot;

    fn id(&self) -> &'static str {
        "fetch-market-news"
    }

    async fn run(&self, input: MarketSnapshot) -> Result<NewsSnapshot> {
        let news = self.fetcher.fetch(&input.market.symbol).await?;
        Ok(NewsSnapshot {
            request: input.request,
            market: input.market,
            news,
        })
    }
}

pub struct AnalyzeSentiment;

#[async_trait]
impl Step for AnalyzeSentiment {
    type Input = NewsSnapshot;
    type Output = SentimentSnapshot;

    fn id(&self) -> &'static str {
        "analyze-sentiment"
    }

    async fn run(&self, input: NewsSnapshot) -> Result<SentimentSnapshot> {
        let (sentiment, insight) = match input.request.user_input() {
            Some((pnl, notes)) => {
                let reading = classify(pnl, notes);
                (Some(reading.sentiment), reading.insight)
            }
            None => (None, NO_SENTIMENT_INSIGHT.to_string()),
        };
        Ok(SentimentSnapshot {
            market: input.market,
            news: input.news,
            sentiment,
            insight,
        })
    }
}

/// How the final strategy text is produced
#[derive(Clone)]
pub enum Recommender {
    /// Rule-based template, no model involved
    Template,
    /// Streamed from a language model
    Llm {
        provider: Arc<dyn LlmProvider>,
        options: GenerationOptions,
    },
}

impl Recommender {
    pub async fn recommend(&self, snapshot: &SentimentSnapshot) -> Result<String> {
        match self {
            Self::Template => Ok(compose_advice(
                &snapshot.market,
                &snapshot.news,
                AdviceSentiment {
                    sentiment: snapshot.sentiment,
                    insight: &snapshot.insight,
                },
            )),
            Self::Llm { provider, options } => {
                let messages = [
                    Message::system(ADVISOR_PROMPT),
                    Message::user(advice_prompt(snapshot)?),
                ];
                tracing::debug!(provider = provider.name(), model = %options.model, "Streaming strategy");

                let stream = provider.complete_stream(&messages, options).await?;
                let text = collect_text(stream).await?;
                Ok(text.trim().to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct MarketData<'a> {
    symbol: &'a str,
    price: Decimal,
    trend: String,
    change: Decimal,
}

fn advice_prompt(snapshot: &SentimentSnapshot) -> Result<String> {
    let market = MarketData {
        symbol: &snapshot.market.symbol,
        price: snapshot.market.price,
        trend: snapshot.market.trend.to_string(),
        change: snapshot.market.change_24h,
    };
    Ok(format!(
        "Based on the following data for {}, suggest a trading strategy:\nMarket Data: {}\nNews: {}\nSentiment: {}\nInsight: {}",
        snapshot.market.symbol,
        serde_json::to_string_pretty(&market)?,
        serde_json::to_string_pretty(&snapshot.news.headlines)?,
        serde_json::to_string_pretty(&snapshot.sentiment)?,
        snapshot.insight,
    ))
}

pub struct RecommendStrategy {
    recommender: Recommender,
}

#[async_trait]
impl Step for RecommendStrategy {
    type Input = SentimentSnapshot;
    type Output = StrategyReport;

    fn id(&self) -> &'static str {
        "recommend-strategy"
    }

    async fn run(&self, input: SentimentSnapshot) -> Result<StrategyReport> {
        let strategy = self.recommender.recommend(&input).await?;
        Ok(StrategyReport::new(&input.market.symbol, strategy))
    }
}

pub type TradeAdvisorWorkflow = Workflow<
    Then<
        Then<Then<Checked<FetchMarketData>, Checked<FetchMarketNews>>, Checked<AnalyzeSentiment>>,
        Checked<RecommendStrategy>,
    >,
>;

pub fn trade_advisor_workflow(kit: &SignalKit, recommender: Recommender) -> TradeAdvisorWorkflow {
    Workflow::new(
        WORKFLOW_ID,
        FetchMarketData {
            fetcher: kit.price_trend.clone(),
        },
    )
    .then(FetchMarketNews {
        fetcher: kit.news.clone(),
    })
    .then(AnalyzeSentiment)
    .then(RecommendStrategy { recommender })
}
