//! Application State

use std::sync::Arc;

use market_scout::MarketScout;
use scout_core::{LlmProvider, ToolRegistry};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Signal fetchers and both workflows
    pub scout: Arc<MarketScout>,

    /// Every capability, callable by name
    pub tools: Arc<ToolRegistry>,

    /// LLM provider for chat and the LLM recommender
    pub provider: Arc<dyn LlmProvider>,

    /// Model used when a chat request names none
    pub default_model: String,
}

impl AppState {
    pub fn new(scout: MarketScout, provider: Arc<dyn LlmProvider>, default_model: impl Into<String>) -> Self {
        let tools = Arc::new(scout.registry());
        Self {
            scout: Arc::new(scout),
            tools,
            provider,
            default_model: default_model.into(),
        }
    }
}
