//! Trader sentiment from PnL and free-text notes (`get_sentiment`)

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use scout_core::{AgentError, ParamType, ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

use crate::model::{Sentiment, UserSentiment};

/// PnL magnitude beyond which a day counts as a clear win or loss
const PNL_THRESHOLD: Decimal = dec!(100);

const FEAR_MARKERS: &[&str] = &["scared"];
const FEAR_EMOJI: &str = "😰";

const PROFIT_INSIGHT: &str = "You're in profit — seems like your edge is working!";
const LOSS_INSIGHT: &str = "Losses detected — maybe it's time to scale back or pause.";
const FLAT_INSIGHT: &str = "Choppy waters — no clear edge today.";
const FEAR_INSIGHT: &str = " You're emotionally reactive — don't let fear trade for you.";

/// Bucket by PnL, then let fearful notes force a bearish read
pub fn classify(pnl: Decimal, notes: &str) -> UserSentiment {
    let (mut sentiment, mut insight) = if pnl > PNL_THRESHOLD {
        (Sentiment::Bullish, PROFIT_INSIGHT.to_string())
    } else if pnl < -PNL_THRESHOLD {
        (Sentiment::Bearish, LOSS_INSIGHT.to_string())
    } else {
        (Sentiment::Neutral, FLAT_INSIGHT.to_string())
    };

    let lowered = notes.to_lowercase();
    if FEAR_MARKERS.iter().any(|m| lowered.contains(m)) || notes.contains(FEAR_EMOJI) {
        sentiment = Sentiment::Bearish;
        insight.push_str(FEAR_INSIGHT);
    }

    UserSentiment { sentiment, insight }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UserSentimentTool;

impl UserSentimentTool {
    pub const TOOL: &'static str = "get_sentiment";
}

#[async_trait]
impl Tool for UserSentimentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::TOOL.into(),
            description: "Classify a trader's mood (Bullish/Bearish/Neutral) from their PnL and notes.".into(),
            parameters: vec![
                ParameterSchema::required("pnl", ParamType::Number, "Profit or loss, e.g. 150 or -80"),
                ParameterSchema::required("notes", ParamType::String, "The trader's thoughts or feelings"),
            ],
            category: Some("sentiment".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let pnl = call
            .opt_f64_arg("pnl")
            .and_then(Decimal::from_f64_retain)
            .ok_or_else(|| AgentError::ToolValidation("'pnl' must be a finite number".into()))?;
        let notes = call.str_arg("notes")?;

        let reading = classify(pnl, notes);
        let output = format!("{}: {}", reading.sentiment, reading.insight);
        Ok(ToolResult::success(Self::TOOL, output).with_data(serde_json::to_value(&reading)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::ToolRegistry;
    use serde_json::json;

    #[test]
    fn profit_is_bullish() {
        let reading = classify(dec!(150), "feeling good");
        assert_eq!(reading.sentiment, Sentiment::Bullish);
        assert_eq!(reading.insight, PROFIT_INSIGHT);
    }

    #[test]
    fn fear_appends_to_loss_insight() {
        let reading = classify(dec!(-150), "I am scared");
        assert_eq!(reading.sentiment, Sentiment::Bearish);
        assert!(reading.insight.starts_with(LOSS_INSIGHT));
        assert!(reading.insight.ends_with("don't let fear trade for you."));
    }

    #[test]
    fn flat_day_is_neutral() {
        let reading = classify(Decimal::ZERO, "neutral day");
        assert_eq!(reading.sentiment, Sentiment::Neutral);
        assert_eq!(reading.insight, FLAT_INSIGHT);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(classify(dec!(100), "").sentiment, Sentiment::Neutral);
        assert_eq!(classify(dec!(-100), "").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn fear_overrides_profit() {
        let shouting = classify(dec!(500), "SCARED this top is in");
        assert_eq!(shouting.sentiment, Sentiment::Bearish);
        assert_eq!(shouting.insight, format!("{PROFIT_INSIGHT}{FEAR_INSIGHT}"));

        let emoji = classify(Decimal::ZERO, "😰");
        assert_eq!(emoji.sentiment, Sentiment::Bearish);
    }

    #[tokio::test]
    async fn runs_as_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(UserSentimentTool);

        let args = json!({"pnl": -150, "notes": "I am scared"});
        let call = ToolCall::new("get_sentiment", args.as_object().unwrap().clone());
        let result = registry.execute(&call).await.unwrap();
        assert!(result.output.starts_with("Bearish: Losses detected"));
        assert_eq!(result.data.unwrap()["sentiment"], "Bearish");

        let args = json!({"pnl": "lots", "notes": "hm"});
        let call = ToolCall::new("get_sentiment", args.as_object().unwrap().clone());
        assert!(registry.execute(&call).await.is_err());
    }
}
