//! Recent headlines (`news_fetcher`)

use async_trait::async_trait;
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::error::Result;
use crate::feed::MarketFeed;
use crate::model::Headlines;
use crate::token::TokenResolver;

#[derive(Clone)]
pub struct NewsFetcher {
    feed: Arc<dyn MarketFeed>,
    resolver: TokenResolver,
    limit: usize,
}

impl NewsFetcher {
    pub const TOOL: &'static str = "news_fetcher";

    pub fn new(feed: Arc<dyn MarketFeed>, limit: usize) -> Self {
        Self {
            feed,
            resolver: TokenResolver::extended(),
            limit,
        }
    }

    /// First `limit` status-update titles, bulleted
    pub async fn fetch(&self, symbol: &str) -> Result<Headlines> {
        let id = self.resolver.resolve(symbol);
        tracing::debug!(%symbol, %id, limit = self.limit, "Fetching headlines");

        let updates = self.feed.status_updates(&id).await?;
        Ok(Headlines::new(
            symbol,
            updates.iter().take(self.limit).map(|u| u.title.as_str()),
        ))
    }
}

#[async_trait]
impl Tool for NewsFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: format!("Up to {} recent headlines for a token.", self.limit),
            parameters: vec![symbol_param()],
            category: Some("news".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch(call.str_arg(SYMBOL_PARAM)?).await?;
        signal_output(Self::TOOL, record)
    }
}
