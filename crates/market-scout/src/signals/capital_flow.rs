//! Simulated capital flow (`capital_flow`)

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

use scout_core::{Tool, ToolCall, ToolResult, ToolSchema};

use super::{SYMBOL_PARAM, signal_output, symbol_param};
use crate::model::CapitalFlow;
use crate::random::RandomSource;

/// Upper bound (exclusive) of a simulated inflow or outflow, in USD
const MAX_FLOW_USD: f64 = 10_000_000.0;

#[derive(Clone)]
pub struct CapitalFlowFetcher {
    rng: Arc<dyn RandomSource>,
}

impl CapitalFlowFetcher {
    pub const TOOL: &'static str = "capital_flow";

    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    pub fn fetch(&self, symbol: &str) -> CapitalFlow {
        let inflow = self.draw_amount();
        let outflow = self.draw_amount();
        tracing::debug!(%symbol, %inflow, %outflow, "Simulated capital flow");
        CapitalFlow::new(symbol, inflow, outflow)
    }

    /// Cents are truncated so a draw just below 1.0 stays under the bound
    fn draw_amount(&self) -> Decimal {
        Decimal::from_f64_retain(self.rng.next_unit() * MAX_FLOW_USD)
            .unwrap_or_default()
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
    }
}

#[async_trait]
impl Tool for CapitalFlowFetcher {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Inflow, outflow and net capital flow for a token (simulated).".into(),
            parameters: vec![symbol_param()],
            category: Some("analysis".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let record = self.fetch(call.str_arg(SYMBOL_PARAM)?);
        signal_output(Self::TOOL, record)
    }
}
