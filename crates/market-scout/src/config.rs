//! Market Scout configuration
//!
//! Read from the process environment (after `.env` loading in the server) or
//! from any lookup closure in tests.

use std::str::FromStr;

use crate::error::{Result, ScoutError};

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_FEAR_GREED_URL: &str = "https://api.alternative.me";
pub const DEFAULT_HEADLINE_LIMIT: usize = 3;

/// How the trade-advisor workflow renders its final strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyMode {
    /// Deterministic rule-based text
    #[default]
    Template,
    /// Streamed from the configured LLM provider
    Llm,
}

impl FromStr for StrategyMode {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "llm" => Ok(Self::Llm),
            other => Err(ScoutError::Config(format!(
                "SCOUT_STRATEGY_MODE must be 'template' or 'llm', got '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScoutConfig {
    pub coingecko_url: String,
    pub fear_greed_url: String,
    /// Headlines kept per token
    pub headline_limit: usize,
    /// Feed headlines into the market-analysis report
    pub include_news: bool,
    /// Fixed seed for the simulated signals
    pub rng_seed: Option<u64>,
    pub strategy_mode: StrategyMode,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            coingecko_url: DEFAULT_COINGECKO_URL.into(),
            fear_greed_url: DEFAULT_FEAR_GREED_URL.into(),
            headline_limit: DEFAULT_HEADLINE_LIMIT,
            include_news: false,
            rng_seed: None,
            strategy_mode: StrategyMode::Template,
        }
    }
}

impl ScoutConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            coingecko_url: lookup("COINGECKO_API_URL").unwrap_or(defaults.coingecko_url),
            fear_greed_url: lookup("FEAR_GREED_API_URL").unwrap_or(defaults.fear_greed_url),
            headline_limit: parse_var(&lookup, "SCOUT_HEADLINE_LIMIT")?
                .unwrap_or(defaults.headline_limit),
            include_news: parse_flag(&lookup, "SCOUT_INCLUDE_NEWS")?
                .unwrap_or(defaults.include_news),
            rng_seed: parse_var(&lookup, "SCOUT_RNG_SEED")?,
            strategy_mode: lookup("SCOUT_STRATEGY_MODE")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.strategy_mode),
        })
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ScoutError::Config(format!("{key} has invalid value '{raw}'")))
        })
        .transpose()
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ScoutError::Config(format!("{key} has invalid value '{raw}'"))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ScoutConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.coingecko_url, DEFAULT_COINGECKO_URL);
        assert_eq!(config.headline_limit, 3);
        assert!(!config.include_news);
        assert!(config.rng_seed.is_none());
        assert_eq!(config.strategy_mode, StrategyMode::Template);
    }

    #[test]
    fn reads_overrides() {
        let config = ScoutConfig::from_lookup(lookup(&[
            ("SCOUT_HEADLINE_LIMIT", "5"),
            ("SCOUT_INCLUDE_NEWS", "true"),
            ("SCOUT_RNG_SEED", "42"),
            ("SCOUT_STRATEGY_MODE", "LLM"),
        ]))
        .unwrap();
        assert_eq!(config.headline_limit, 5);
        assert!(config.include_news);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.strategy_mode, StrategyMode::Llm);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ScoutConfig::from_lookup(lookup(&[("SCOUT_HEADLINE_LIMIT", "many")])),
            Err(ScoutError::Config(_))
        ));
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_INCLUDE_NEWS", "maybe")])).is_err());
        assert!(ScoutConfig::from_lookup(lookup(&[("SCOUT_STRATEGY_MODE", "magic")])).is_err());
    }
}
