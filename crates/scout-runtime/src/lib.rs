//! # scout-runtime
//!
//! Runtime LLM providers for market-scout.
//!
//! ## Providers
//!
//! - **Ollama** (default): local inference through `ollama-rs`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scout_runtime::OllamaProvider;
//!
//! let provider = Arc::new(OllamaProvider::from_env());
//! let agent = ToolAgent::new(provider, Arc::new(registry), AgentConfig::default());
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

pub use scout_core::{AgentError, LlmProvider, Message, Result, Role};
