//! Simulated chart pattern (`technical_indicators`)

use async_trait::async_trait;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::model::{SIMULATED_PATTERN, TechnicalPattern};

/// Always reports the same pattern; no market data is consulted
#[derive(Clone, Copy, Debug, Default)]
pub struct TechnicalFetcher;

impl TechnicalFetcher {
    pub const TOOL: &'static str = "technical_indicators";

    pub fn fetch(self, symbol: &str) -> TechnicalPattern {
        TechnicalPattern::new(symbol, SIMULATED_PATTERN)
    }
}

#[async_trait]
impl Tool for TechnicalFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Chart pattern detected for a token (simulated).".into(),
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

    #[test]
    fn reports_constant_pattern() {
        let pattern = TechnicalFetcher.fetch("sol");
        assert_eq!(pattern.indicator, "Cup and Handle");
        assert_eq!(
            pattern.message,
            "SOL has formed a Cup and Handle — potential breakout soon."
        );
    }
}
