//! market-scout HTTP Server
//!
//! Axum server exposing the signal tools, both analysis workflows and a
//! tool-calling chat agent backed by Ollama.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_scout::{
    HttpMarketFeed, MarketScout, Recommender, ScoutConfig, SeededRandom, StrategyMode,
};
use scout_core::LlmProvider;
use scout_runtime::{OllamaConfig, OllamaProvider};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Strategy text should stay close to the data it is given
const STRATEGY_TEMPERATURE: f32 = 0.3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before reading RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = ServerConfig::from_env()?;
    let scout_config = ScoutConfig::from_env()?;
    let ollama = OllamaConfig::from_env();

    // LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::from_config(ollama.clone()));
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!(url = %ollama.base_url(), "✓ Connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - chat and LLM strategies will fail");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Market data and simulated signals
    let feed = Arc::new(HttpMarketFeed::new(&scout_config)?);
    let rng = Arc::new(SeededRandom::new(scout_config.rng_seed));
    if let Some(seed) = rng.seed() {
        tracing::info!(seed, "Simulated signals are seeded");
    }

    let mut scout = MarketScout::new(feed, rng, &scout_config);
    if scout_config.strategy_mode == StrategyMode::Llm {
        scout = scout.with_recommender(Recommender::Llm {
            provider: Arc::clone(&provider),
            options: ollama.generation_options().with_temperature(STRATEGY_TEMPERATURE),
        });
    }
    tracing::info!(
        mode = ?scout_config.strategy_mode,
        include_news = scout_config.include_news,
        "Workflows ready"
    );

    let state = AppState::new(scout, provider, ollama.default_model.clone());
    tracing::info!("Registered {} tools:", state.tools.len());
    for name in state.tools.names() {
        tracing::info!("  • {}", name);
    }

    let app = routes::app(state, server.request_timeout);
    let listener = tokio::net::TcpListener::bind(&server.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 market-scout server running on http://{}", server.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                         - Health check");
    tracing::info!("  GET  /api/tools                      - List tools");
    tracing::info!("  POST /api/tools/{{name}}               - Run a tool");
    tracing::info!("  POST /api/workflows/market-analysis  - Five-signal report");
    tracing::info!("  POST /api/workflows/trade-advisor    - Trade advice");
    tracing::info!("  POST /api/chat                       - Ask the agent");

    axum::serve(listener, app).await?;

    Ok(())
}
