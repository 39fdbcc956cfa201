//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use market_scout::{MarketAnalysisRequest, SCOUT_AGENT_PROMPT, StrategyReport, TradeAdvisorRequest};
use scout_core::{
    AgentConfig, GenerationOptions, ToolAgent, ToolCall, ToolResult, ToolSchema,
};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub provider_connected: bool,
    pub tools: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub conversation_id: String,
    pub model: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check; reports "degraded" when the LLM provider is unreachable
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);
    if !provider_connected {
        tracing::warn!(provider = state.provider.name(), "LLM provider not reachable");
    }

    Json(HealthResponse {
        status: if provider_connected { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
        provider_connected,
        tools: state.tools.len(),
    })
}

pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Invoke one tool by name with a JSON object of arguments
pub async fn execute_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(arguments): Json<Map<String, Value>>,
) -> Result<Json<ToolResult>, ApiError> {
    let call = ToolCall::new(name, arguments);
    Ok(Json(state.tools.execute(&call).await?))
}

pub async fn market_analysis(
    State(state): State<AppState>,
    Json(request): Json<MarketAnalysisRequest>,
) -> Result<Json<StrategyReport>, ApiError> {
    let report = state.scout.analyze(&request.token_symbol).await?;
    Ok(Json(report))
}

pub async fn trade_advisor(
    State(state): State<AppState>,
    Json(request): Json<TradeAdvisorRequest>,
) -> Result<Json<StrategyReport>, ApiError> {
    Ok(Json(state.scout.advise(request).await?))
}

/// Free-form question answered by the tool-calling agent
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let model = payload
        .model
        .unwrap_or_else(|| state.default_model.clone());

    let config = AgentConfig {
        system_prompt: SCOUT_AGENT_PROMPT.into(),
        generation: GenerationOptions::for_model(model.clone()),
        ..Default::default()
    };
    let agent = ToolAgent::new(state.provider.clone(), state.tools.clone(), config);

    let message = agent.ask(&payload.message).await?;
    let conversation_id = payload
        .conversation_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    Ok(Json(ChatResponse {
        message,
        conversation_id,
        model,
    }))
}
