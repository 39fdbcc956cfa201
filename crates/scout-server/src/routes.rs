//! Router

use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handlers::{chat, execute_tool, health_check, list_tools, market_analysis, trade_advisor};
use crate::state::AppState;

pub fn app(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Capabilities
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(execute_tool))
        // Workflows
        .route("/api/workflows/market-analysis", post(market_analysis))
        .route("/api/workflows/trade-advisor", post(trade_advisor))
        // Agent
        .route("/api/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use market_scout::{MarketScout, MockMarketFeed, ScoutConfig, SeededRandom};
    use scout_core::provider::{Completion, CompletionStream, ModelInfo};
    use scout_core::{AgentError, GenerationOptions, LlmProvider, Message};

    /// Answers every prompt with the same text
    struct CannedProvider;

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn health_check(&self) -> scout_core::Result<bool> {
            Ok(false)
        }

        async fn complete(&self, _messages: &[Message], options: &GenerationOptions) -> scout_core::Result<Completion> {
            Ok(Completion {
                content: "BTC looks strong.".into(),
                model: options.model.clone(),
                usage: None,
            })
        }

        async fn complete_stream(&self, _messages: &[Message], _options: &GenerationOptions) -> scout_core::Result<CompletionStream> {
            Err(AgentError::ProviderUnavailable("no stream".into()))
        }

        async fn list_models(&self) -> scout_core::Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    fn router() -> Router {
        let scout = MarketScout::new(
            Arc::new(MockMarketFeed::new()),
            Arc::new(SeededRandom::from_seed(7)),
            &ScoutConfig::default(),
        );
        app(
            AppState::new(scout, Arc::new(CannedProvider), "llama3.2"),
            Duration::from_secs(10),
        )
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_degraded_provider() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["tools"], 9);
    }

    #[tokio::test]
    async fn lists_tools_in_name_order() {
        let (status, body) = send("GET", "/api/tools", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.first(), Some(&"analyze_market"));
        assert!(names.contains(&"strategy_builder"));
    }

    #[tokio::test]
    async fn market_analysis_returns_report() {
        let (status, body) = send(
            "POST",
            "/api/workflows/market-analysis",
            Some(json!({"tokenSymbol": "btc"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "BTC");
        assert!(body["strategy"].as_str().unwrap().starts_with("📈 BTC Market Analysis"));
    }

    #[tokio::test]
    async fn blank_symbol_is_unprocessable() {
        let (status, body) = send(
            "POST",
            "/api/workflows/market-analysis",
            Some(json!({"tokenSymbol": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "SCHEMA_VIOLATION");
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let (status, body) = send(
            "POST",
            "/api/workflows/trade-advisor",
            Some(json!({"tokenSymbol": "FAKE", "pnl": 10, "notes": "ok"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Token FAKE not found");
        assert_eq!(body["code"], "TOKEN_NOT_FOUND");
    }

    #[tokio::test]
    async fn trade_advisor_classifies_feelings() {
        let (status, body) = send(
            "POST",
            "/api/workflows/trade-advisor",
            Some(json!({"tokenSymbol": "SOL", "pnl": 150, "notes": "feeling good"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["strategy"].as_str().unwrap().contains("• Sentiment: Bullish"));
    }

    #[tokio::test]
    async fn tool_route_executes_and_validates() {
        let (status, body) = send(
            "POST",
            "/api/tools/get_sentiment",
            Some(json!({"pnl": 0, "notes": "neutral day"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sentiment"], "Neutral");

        let (status, _) = send("POST", "/api/tools/get_sentiment", Some(json!({"pnl": 0}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send("POST", "/api/tools/nope", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "TOOL_NOT_FOUND");

        let (status, _) = send(
            "POST",
            "/api/tools/analyze_market",
            Some(json!({"tokenSymbol": "FAKE"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chat_answers_through_agent() {
        let (status, body) = send("POST", "/api/chat", Some(json!({"message": "How is BTC?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "BTC looks strong.");
        assert_eq!(body["model"], "llama3.2");
    }
}
