//! Ollama LLM Provider
//!
//! `LlmProvider` for local Ollama inference through `ollama-rs`.

use async_trait::async_trait;
use futures::StreamExt;
use ollama_rs::{
    Ollama,
    generation::chat::{
        ChatMessage, ChatMessageFinalResponseData, ChatMessageResponse, MessageRole,
        request::ChatMessageRequest,
    },
    models::ModelOptions,
};

use scout_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{
        Completion, CompletionStream, GenerationOptions, LlmProvider, ModelInfo, StreamChunk,
        TokenUsage,
    },
};

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    pub port: u16,

    /// Model used when the caller does not pick one
    pub default_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            default_model: "llama3.2".into(),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("OLLAMA_HOST").unwrap_or(defaults.host),
            port: lookup("OLLAMA_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.default_model),
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions::for_model(self.default_model.clone())
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    pub fn from_config(config: OllamaConfig) -> Self {
        Self {
            client: Ollama::new(config.host.trim_end_matches('/').to_string(), config.port),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::from_config(OllamaConfig::from_env())
    }

    pub fn localhost() -> Self {
        Self::from_config(OllamaConfig::default())
    }

    pub const fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    // Tool output is presented to the model as user context
                    Role::User | Role::Tool => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect()
    }

    fn chat_request(messages: &[Message], options: &GenerationOptions) -> ChatMessageRequest {
        let model_options = ModelOptions::default()
            .temperature(options.temperature)
            .top_p(options.top_p)
            .num_predict(i32::try_from(options.max_tokens).unwrap_or(i32::MAX));

        ChatMessageRequest::new(options.model.clone(), Self::convert_messages(messages))
            .options(model_options)
    }
}

fn saturating_u32(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn token_usage(data: &ChatMessageFinalResponseData) -> TokenUsage {
    TokenUsage::new(
        saturating_u32(data.prompt_eval_count),
        saturating_u32(data.eval_count),
    )
}

fn into_chunk(response: ChatMessageResponse) -> StreamChunk {
    let usage = response.final_data.as_ref().map(token_usage);
    StreamChunk {
        delta: response.message.content,
        done: usage.is_some(),
        usage,
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.list_local_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let response = self
            .client
            .send_chat_messages(Self::chat_request(messages, options))
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let chunk = into_chunk(response);
        Ok(Completion {
            content: chunk.delta,
            model: options.model.clone(),
            usage: chunk.usage,
        })
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        let stream = self
            .client
            .send_chat_messages_stream(Self::chat_request(messages, options))
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        let chunks = stream.map(|item| {
            item.map(into_chunk)
                .map_err(|e| AgentError::Provider(format!("stream interrupted: {e:?}")))
        });

        Ok(Box::pin(chunks))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(|m| ModelInfo {
                id: m.name.clone(),
                name: m.name,
            })
            .collect())
    }
}
