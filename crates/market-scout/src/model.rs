//! Signal records
//!
//! One record per fetcher. Each record is built through its constructor, which
//! derives the `message` from the other fields so the two never disagree.
//! Uses `rust_decimal` for prices, flows and percentages.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Placeholder when the headline feed has nothing for a token
pub const NO_HEADLINES: &str = "No major headlines found.";

/// Constant pattern reported by the simulated technical analysis
pub const SIMULATED_PATTERN: &str = "Cup and Handle";

/// Round half away from zero to `dp` places for display
fn fixed(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// 24h price trend bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

impl Trend {
    /// Threshold (in percent) a 24h move must exceed to count as a trend
    pub const THRESHOLD: Decimal = dec!(2);

    pub fn from_change(change_24h: Decimal) -> Self {
        if change_24h > Self::THRESHOLD {
            Self::Uptrend
        } else if change_24h < -Self::THRESHOLD {
            Self::Downtrend
        } else {
            Self::Sideways
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Uptrend => "Uptrend",
            Self::Downtrend => "Downtrend",
            Self::Sideways => "Sideways",
        })
    }
}

/// Spot price with 24h trend
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTrend {
    pub symbol: String,
    pub price: Decimal,
    pub change_24h: Decimal,
    pub trend: Trend,
    pub message: String,
}

impl PriceTrend {
    pub fn new(symbol: &str, price: Decimal, change_24h: Decimal) -> Self {
        let symbol = symbol.to_uppercase();
        let trend = Trend::from_change(change_24h);
        let message = match trend {
            Trend::Uptrend => format!(
                "{symbol} is pumping today — up {:.2}%!",
                fixed(change_24h, 2)
            ),
            Trend::Downtrend => format!(
                "{symbol} is bleeding — down {:.2}%. Stay cautious.",
                fixed(change_24h, 2)
            ),
            Trend::Sideways => format!("{symbol} is ranging. No major moves yet."),
        };
        Self {
            symbol,
            price,
            change_24h,
            trend,
            message,
        }
    }
}

/// Price with 24h change and high/low range
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePerformance {
    pub symbol: String,
    pub price: Decimal,
    pub change_24h: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,
    pub message: String,
}

impl PricePerformance {
    pub fn new(
        symbol: &str,
        price: Decimal,
        change_24h: Decimal,
        high_24h: Decimal,
        low_24h: Decimal,
    ) -> Self {
        let message = format!(
            "Price: ${:.2}, 24h Change: {:.2}%, High: ${}, Low: ${}",
            fixed(price, 2),
            fixed(change_24h, 2),
            high_24h.normalize(),
            low_24h.normalize()
        );
        Self {
            symbol: symbol.to_uppercase(),
            price,
            change_24h,
            high_24h,
            low_24h,
            message,
        }
    }
}

/// Fear & Greed index reading
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentIndex {
    pub sentiment_score: u8,
    pub sentiment_level: String,
    pub message: String,
}

impl SentimentIndex {
    pub fn new(score: u8, level: impl Into<String>) -> Self {
        let level = level.into();
        let message = format!("The market is currently in a state of {level} ({score}/100).");
        Self {
            sentiment_score: score,
            sentiment_level: level,
            message,
        }
    }
}

/// Simulated capital flow
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFlow {
    pub symbol: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net_flow: Decimal,
    pub message: String,
}

impl CapitalFlow {
    pub fn new(symbol: &str, inflow: Decimal, outflow: Decimal) -> Self {
        let symbol = symbol.to_uppercase();
        let net_flow = inflow - outflow;
        let message = if net_flow > Decimal::ZERO {
            format!(
                "Strong interest in {symbol} with ${} net inflow.",
                fixed(net_flow, 0)
            )
        } else {
            format!(
                "More capital leaving {symbol} than entering. Net outflow: ${}.",
                fixed(net_flow.abs(), 0)
            )
        };
        Self {
            symbol,
            inflow,
            outflow,
            net_flow,
            message,
        }
    }

    pub fn is_net_inflow(&self) -> bool {
        self.net_flow > Decimal::ZERO
    }
}

/// Simulated chart pattern
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalPattern {
    pub symbol: String,
    pub indicator: String,
    pub message: String,
}

impl TechnicalPattern {
    pub fn new(symbol: &str, indicator: &str) -> Self {
        let symbol = symbol.to_uppercase();
        let message = format!("{symbol} has formed a {indicator} — potential breakout soon.");
        Self {
            symbol,
            indicator: indicator.to_string(),
            message,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhaleLevel {
    High,
    Low,
}

/// Simulated whale activity
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhaleActivity {
    pub symbol: String,
    pub whale_activity: WhaleLevel,
    pub message: String,
}

impl WhaleActivity {
    pub fn new(symbol: &str, level: WhaleLevel) -> Self {
        let symbol = symbol.to_uppercase();
        let message = match level {
            WhaleLevel::High => format!("Whales are actively accumulating {symbol}."),
            WhaleLevel::Low => format!("No significant whale activity on {symbol}."),
        };
        Self {
            symbol,
            whale_activity: level,
            message,
        }
    }
}

/// Bulleted headlines; never empty
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headlines {
    pub symbol: String,
    pub headlines: Vec<String>,
}

impl Headlines {
    /// Bullet each title; an empty list becomes the single placeholder line
    pub fn new<I, S>(symbol: &str, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut headlines: Vec<String> = titles
            .into_iter()
            .map(|t| format!("• {}", t.as_ref().trim()))
            .collect();
        if headlines.is_empty() {
            headlines.push(NO_HEADLINES.to_string());
        }
        Self {
            symbol: symbol.to_uppercase(),
            headlines,
        }
    }

    pub fn message(&self) -> String {
        self.headlines.join("\n")
    }

    pub fn is_placeholder(&self) -> bool {
        self.headlines.len() == 1 && self.headlines[0] == NO_HEADLINES
    }
}

/// Trader mood derived from PnL and notes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSentiment {
    pub sentiment: Sentiment,
    pub insight: String,
}

/// Output of exactly one fetcher
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum SignalResult {
    PriceTrend(PriceTrend),
    PricePerformance(PricePerformance),
    SentimentIndex(SentimentIndex),
    CapitalFlow(CapitalFlow),
    TechnicalPattern(TechnicalPattern),
    WhaleActivity(WhaleActivity),
    Headlines(Headlines),
}

impl SignalResult {
    pub fn message(&self) -> String {
        match self {
            Self::PriceTrend(r) => r.message.clone(),
            Self::PricePerformance(r) => r.message.clone(),
            Self::SentimentIndex(r) => r.message.clone(),
            Self::CapitalFlow(r) => r.message.clone(),
            Self::TechnicalPattern(r) => r.message.clone(),
            Self::WhaleActivity(r) => r.message.clone(),
            Self::Headlines(r) => r.message(),
        }
    }
}

macro_rules! impl_into_signal {
    ($($record:ident),* $(,)?) => {
        $(
            impl From<$record> for SignalResult {
                fn from(record: $record) -> Self {
                    Self::$record(record)
                }
            }
        )*
    };
}

impl_into_signal!(
    PriceTrend,
    PricePerformance,
    SentimentIndex,
    CapitalFlow,
    TechnicalPattern,
    WhaleActivity,
    Headlines,
);
