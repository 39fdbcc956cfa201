//! Simulated whale activity (`whale_accumulation`)

use async_trait::async_trait;
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::model::{WhaleActivity, WhaleLevel};
use crate::random::RandomSource;

#[derive(Clone)]
pub struct WhaleFetcher {
    rng: Arc<dyn RandomSource>,
}

impl WhaleFetcher {
    pub const TOOL: &'static str = "whale_accumulation";

    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    pub fn fetch(&self, symbol: &str) -> WhaleActivity {
        let level = if self.rng.next_unit() > 0.5 {
            WhaleLevel::High
        } else {
            WhaleLevel::Low
        };
        WhaleActivity::new(symbol, level)
    }
}

#[async_trait]
impl Tool for WhaleFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Whether large holders are accumulating a token (simulated).".into(),
            parameters: vec![symbol_param()],
            category: Some("analysis".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch(call.str_arg(SYMBOL_PARAM)?);
        signal_output(Self::TOOL, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn half_is_low() {
        let fetcher = WhaleFetcher::new(Arc::new(ScriptedRandom::new(&[0.5, 0.51])));
        assert_eq!(fetcher.fetch("BTC").whale_activity, WhaleLevel::Low);
        let high = fetcher.fetch("btc");
        assert_eq!(high.whale_activity, WhaleLevel::High);
        assert_eq!(high.message, "Whales are actively accumulating BTC.");
    }
}
