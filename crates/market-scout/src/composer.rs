//! Strategy composer
//!
//! Pure text rendering: the five-signal market report, the trade-advisor
//! template, and the `strategy_builder` tool over the report renderer.

use async_trait::async_trait;

use scout_core::{AgentError, ParamType, ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

use crate::context::{Signal, SignalSet, StrategyContext};
use crate::model::{Headlines, PriceTrend, Sentiment, Trend};
use crate::pipeline::Validate;

pub const RULE: &str = "═══════════════════════════";

pub const STRATEGY_HEADER: &str = "💡 STRATEGY";

pub const STRATEGY_CLOSING: &str =
    "Stay alert and consider these signals. Look out for confirmation patterns and manage risk accordingly.";

fn title(symbol: &str) -> String {
    format!("📈 {} Market Analysis", symbol.to_uppercase())
}

/// Render the market-analysis report.
///
/// Sections follow [`Signal`] order, one per signal in the context's set,
/// closed by the fixed strategy paragraph.
pub fn compose(context: &StrategyContext) -> String {
    let mut out = format!("{}\n{RULE}\n", title(&context.symbol));
    for signal in context.signals.iter() {
        let message = context.message(signal).unwrap_or_default();
        out.push_str(&format!("\n{}\n{message}\n", signal.header()));
    }
    out.push_str(&format!("\n{STRATEGY_HEADER}\n{STRATEGY_CLOSING}"));
    out
}

/// Sentiment half of the trade-advisor inputs
#[derive(Clone, Copy, Debug)]
pub struct AdviceSentiment<'a> {
    pub sentiment: Option<Sentiment>,
    pub insight: &'a str,
}

/// Render the rule-based trade-advisor strategy
pub fn compose_advice(market: &PriceTrend, news: &Headlines, mood: AdviceSentiment<'_>) -> String {
    let mut out = format!("{}\n{RULE}\n", title(&market.symbol));

    out.push_str(&format!(
        "\n💹 MARKET SUMMARY\n• Price: ${:.2} USD\n• Trend: {}\n• 24h Change: {:.2}%\n",
        market.price.round_dp(2),
        market.trend,
        market.change_24h.round_dp(2),
    ));

    out.push_str("\n📰 RECENT HEADLINES\n");
    for headline in &news.headlines {
        out.push_str(&format!("{headline}\n"));
    }

    let sentiment = mood
        .sentiment
        .map_or_else(|| "Not provided".to_string(), |s| s.to_string());
    out.push_str(&format!(
        "\n😎 SENTIMENT ANALYSIS\n• Sentiment: {sentiment}\n• Insight: {}\n",
        mood.insight
    ));

    let call = recommend(market.trend, mood.sentiment);
    out.push_str(&format!(
        "\n💡 TRADING STRATEGY\n• Action: {}\n• Rationale: {}\n• Risk Level: {}\n• Suggested Timeframe: {}",
        call.action,
        rationale(market, news, mood.sentiment),
        call.risk,
        call.timeframe,
    ));
    out
}

struct Call {
    action: &'static str,
    risk: &'static str,
    timeframe: &'static str,
}

const SHORT: &str = "Short-term (1-3 days)";
const MEDIUM: &str = "Medium-term (1-2 weeks)";

fn recommend(trend: Trend, sentiment: Option<Sentiment>) -> Call {
    let (action, risk, timeframe) = match (trend, sentiment) {
        (Trend::Uptrend, Some(Sentiment::Bearish)) => ("Hold", "Moderate", SHORT),
        (Trend::Uptrend, _) => ("Buy", "Moderate", SHORT),
        (Trend::Downtrend, Some(Sentiment::Bullish)) => ("Hold", "High", SHORT),
        (Trend::Downtrend, _) => ("Avoid", "High", SHORT),
        (Trend::Sideways, Some(Sentiment::Bearish)) => ("Avoid", "Low", MEDIUM),
        (Trend::Sideways, _) => ("Hold", "Low", MEDIUM),
    };
    Call {
        action,
        risk,
        timeframe,
    }
}

fn rationale(market: &PriceTrend, news: &Headlines, sentiment: Option<Sentiment>) -> String {
    let mut text = format!(
        "{} is in a {} ({:.2}% over 24h)",
        market.symbol,
        market.trend.to_string().to_lowercase(),
        market.change_24h.round_dp(2)
    );
    if news.is_placeholder() {
        text.push_str(" with no major headlines");
    } else {
        text.push_str(&format!(" with {} recent headline(s)", news.headlines.len()));
    }
    match sentiment {
        Some(s) => text.push_str(&format!("; your own read is {}.", s.to_string().to_lowercase())),
        None => text.push_str("; no trader sentiment supplied, so this rests on market data only."),
    }
    text
}

/// Builds the market report from already-fetched signal messages
#[derive(Clone, Copy, Debug, Default)]
pub struct StrategyBuilderTool;

impl StrategyBuilderTool {
    pub const TOOL: &'static str = "strategy_builder";

    const ARGS: &'static [(&'static str, Signal)] = &[
        ("sentimentMessage", Signal::MarketSentiment),
        ("priceMessage", Signal::PricePerformance),
        ("flowMessage", Signal::CapitalFlow),
        ("techMessage", Signal::Technical),
        ("whaleMessage", Signal::Whale),
    ];
}

#[async_trait]
impl Tool for StrategyBuilderTool {
    fn schema(&self) -> ToolSchema {
        let mut parameters = vec![ParameterSchema::required(
            "symbol",
            ParamType::String,
            "Token ticker",
        )];
        parameters.extend(Self::ARGS.iter().map(|(name, signal)| {
            ParameterSchema::required(name, ParamType::String, signal.header())
        }));
        parameters.push(ParameterSchema::optional(
            "newsMessage",
            ParamType::String,
            Signal::News.header(),
        ));

        ToolSchema {
            name: Self::TOOL.into(),
            description: "Compose a market analysis report from signal messages.".into(),
            parameters,
            category: Some("strategy".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> scout_core::Result<ToolResult> {
        let news = call.opt_str_arg("newsMessage");
        let signals = if news.is_some() {
            SignalSet::with_news()
        } else {
            SignalSet::five_signal()
        };

        let mut context = StrategyContext::new(call.str_arg("symbol")?, signals);
        for (name, signal) in Self::ARGS {
            context = context.with(*signal, call.str_arg(name)?);
        }
        if let Some(news) = news {
            context = context.with(Signal::News, news);
        }
        context.validate().map_err(AgentError::ToolValidation)?;

        Ok(ToolResult::success(Self::TOOL, compose(&context)))
    }
}
