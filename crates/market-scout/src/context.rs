//! Aggregated signal context
//!
//! The ordered set of messages the composer turns into a report. Which signals
//! feed the report is configuration ([`SignalSet`]), not code.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::pipeline::Validate;

/// A report section. Declaration order is report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    MarketSentiment,
    PricePerformance,
    CapitalFlow,
    Technical,
    Whale,
    News,
}

impl Signal {
    pub const fn header(self) -> &'static str {
        match self {
            Self::MarketSentiment => "🧠 MARKET SENTIMENT",
            Self::PricePerformance => "💹 PRICE PERFORMANCE",
            Self::CapitalFlow => "💸 CAPITAL FLOW",
            Self::Technical => "📊 TECHNICAL INDICATORS",
            Self::Whale => "🐋 WHALE ACCUMULATION",
            Self::News => "📰 RECENT HEADLINES",
        }
    }
}

/// Signals feeding one report. Market sentiment is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet(BTreeSet<Signal>);

impl SignalSet {
    /// Sentiment, price performance, capital flow, technical, whale
    pub fn five_signal() -> Self {
        Self(
            [
                Signal::MarketSentiment,
                Signal::PricePerformance,
                Signal::CapitalFlow,
                Signal::Technical,
                Signal::Whale,
            ]
            .into_iter()
            .collect(),
        )
    }

    /// The five-signal set plus headlines
    pub fn with_news() -> Self {
        let mut set = Self::five_signal();
        set.0.insert(Signal::News);
        set
    }

    pub fn from_signals(signals: impl IntoIterator<Item = Signal>) -> Self {
        let mut set: BTreeSet<Signal> = signals.into_iter().collect();
        set.insert(Signal::MarketSentiment);
        Self(set)
    }

    pub fn contains(&self, signal: Signal) -> bool {
        self.0.contains(&signal)
    }

    /// Signals in report order
    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SignalSet {
    fn default() -> Self {
        Self::five_signal()
    }
}

/// Symbol plus one message per configured signal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyContext {
    pub symbol: String,
    pub signals: SignalSet,
    pub messages: BTreeMap<Signal, String>,
}

impl StrategyContext {
    pub fn new(symbol: &str, signals: SignalSet) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            signals,
            messages: BTreeMap::new(),
        }
    }

    /// Record the message for a signal; signals outside the set are ignored
    #[must_use]
    pub fn with(mut self, signal: Signal, message: impl Into<String>) -> Self {
        if self.signals.contains(signal) {
            self.messages.insert(signal, message.into());
        }
        self
    }

    pub fn message(&self, signal: Signal) -> Option<&str> {
        self.messages.get(&signal).map(String::as_str)
    }
}

impl Validate for StrategyContext {
    fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("symbol must not be blank".into());
        }
        for signal in self.signals.iter() {
            match self.message(signal) {
                Some(message) if !message.trim().is_empty() => {}
                _ => return Err(format!("{signal:?} message is missing or blank")),
            }
        }
        Ok(())
    }
}
