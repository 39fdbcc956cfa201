//! Tool-calling agent loop
//!
//! The agent is the decision-making side of the capability registry: the LLM
//! reads the tool descriptions, may answer with a fenced `tool` block, and the
//! loop executes that call through the [`ToolRegistry`] and feeds the result
//! back until the model answers in plain text.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolCall, ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Instructions placed before the tool descriptions
    pub system_prompt: String,

    /// Maximum model turns before giving up
    pub max_iterations: usize,

    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need to use a tool, respond with a JSON block in this exact format:
```tool
{"tool": "tool_name", "arguments": {"arg1": "value1"}}
```

After receiving tool results, synthesize them into a helpful response.
Never call a tool unless its inputs are clearly defined."#;

const TOOL_FENCE: &str = "```tool";

/// Agent that lets an LLM pick tools from a registry
pub struct ToolAgent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl ToolAgent {
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    fn system_prompt(&self) -> String {
        if self.tools.is_empty() {
            return self.config.system_prompt.clone();
        }
        format!(
            "{}\n\n{}",
            self.config.system_prompt,
            self.tools.generate_prompt_section()
        )
    }

    /// Answer a single question, running tools as the model requests them
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut messages = vec![Message::system(self.system_prompt()), Message::user(question)];

        for iteration in 1..=self.config.max_iterations {
            let completion = self
                .provider
                .complete(&messages, &self.config.generation)
                .await?;
            let content = completion.content;
            messages.push(Message::assistant(content.clone()));

            let Some(call) = parse_tool_call(&content) else {
                return Ok(content);
            };

            tracing::debug!(iteration, tool = %call.name, "Model requested tool");
            let result = self.execute_tool(&call).await;
            messages.push(Message::tool(format_tool_result(&result), call.id.clone()));
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Tool failures go back to the model instead of aborting the conversation
    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        match self.tools.execute(call).await {
            Ok(result) => result,
            Err(e) => {
                let mut failed = ToolResult::failure(call.name.clone(), format!("Error: {e}"));
                failed.id.clone_from(&call.id);
                failed
            }
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Parse a fenced `tool` block, falling back to an inline JSON object with a "tool" key
pub fn parse_tool_call(content: &str) -> Option<ToolCall> {
    let json = match content.find(TOOL_FENCE) {
        Some(start) => {
            let body = &content[start + TOOL_FENCE.len()..];
            let end = body.find("```")?;
            body[..end].trim()
        }
        None => {
            if !content.contains(r#""tool""#) {
                return None;
            }
            let start = content.find('{')?;
            let end = content.rfind('}')?;
            if end <= start {
                return None;
            }
            &content[start..=end]
        }
    };

    let mut call: ToolCall = serde_json::from_str(json).ok()?;
    if call.id.is_none() {
        call.id = Some(uuid::Uuid::new_v4().to_string());
    }
    Some(call)
}

fn format_tool_result(result: &ToolResult) -> String {
    let status = if result.success { "returned" } else { "failed" };
    format!("[Tool '{}' {}]\n{}", result.name, status, result.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Completion, CompletionStream, ModelInfo, StreamChunk};
    use crate::tool::{ParamType, ParameterSchema, Tool, ToolSchema};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(&self, messages: &[Message], options: &GenerationOptions) -> Result<Completion> {
            self.seen.lock().unwrap().push(messages.to_vec());
            let content = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AgentError::Provider("script exhausted".into()))?;
            Ok(Completion {
                content,
                model: options.model.clone(),
                usage: None,
            })
        }

        async fn complete_stream(&self, messages: &[Message], options: &GenerationOptions) -> Result<CompletionStream> {
            let completion = self.complete(messages, options).await?;
            let chunk = StreamChunk {
                delta: completion.content,
                done: true,
                usage: None,
            };
            Ok(Box::pin(futures::stream::iter(vec![Ok(chunk)])))
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    struct TrendTool;

    #[async_trait]
    impl Tool for TrendTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "analyze_market".into(),
                description: "Price trend".into(),
                parameters: vec![ParameterSchema::required("tokenSymbol", ParamType::String, "Ticker")],
                category: None,
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let symbol = call.str_arg("tokenSymbol")?;
            Ok(ToolResult::success("analyze_market", format!("{symbol} is ranging.")))
        }
    }

    fn agent(provider: Arc<ScriptedProvider>, max_iterations: usize) -> ToolAgent {
        let mut tools = ToolRegistry::new();
        tools.register(TrendTool);
        let config = AgentConfig {
            max_iterations,
            ..Default::default()
        };
        ToolAgent::new(provider, Arc::new(tools), config)
    }

    #[test]
    fn default_prompt_shows_tool_block_format() {
        let prompt = AgentConfig::default().system_prompt;
        assert!(prompt.contains(TOOL_FENCE));
        assert!(prompt.contains(r#"{"tool": "tool_name", "arguments": {"arg1": "value1"}}"#));
    }

    #[test]
    fn parses_fenced_tool_block() {
        let content = "Let me check.\n```tool\n{\"tool\": \"analyze_market\", \"arguments\": {\"tokenSymbol\": \"BTC\"}}\n```";
        let call = parse_tool_call(content).unwrap();
        assert_eq!(call.name, "analyze_market");
        assert_eq!(call.str_arg("tokenSymbol").unwrap(), "BTC");
        assert!(call.id.is_some());
    }

    #[test]
    fn parses_inline_tool_json() {
        let content = r#"Calling {"tool": "analyze_market", "arguments": {"tokenSymbol": "SOL"}} now"#;
        assert_eq!(parse_tool_call(content).unwrap().name, "analyze_market");
    }

    #[test]
    fn plain_text_is_not_a_tool_call() {
        assert!(parse_tool_call("BTC looks calm today.").is_none());
    }

    #[tokio::test]
    async fn runs_requested_tool_then_answers() {
        let provider = Arc::new(ScriptedProvider::new(&[
            "```tool\n{\"tool\": \"analyze_market\", \"arguments\": {\"tokenSymbol\": \"BTC\"}}\n```",
            "BTC is flat, wait for a breakout.",
        ]));
        let answer = agent(provider.clone(), 5).ask("check BTC").await.unwrap();
        assert_eq!(answer, "BTC is flat, wait for a breakout.");

        let seen = provider.seen.lock().unwrap();
        let second_turn = seen.last().unwrap();
        let tool_msg = second_turn.last().unwrap();
        assert_eq!(tool_msg.role, crate::message::Role::Tool);
        assert!(tool_msg.content.contains("BTC is ranging."));
    }

    #[tokio::test]
    async fn tool_errors_are_reported_to_the_model() {
        let provider = Arc::new(ScriptedProvider::new(&[
            "```tool\n{\"tool\": \"analyze_market\", \"arguments\": {}}\n```",
            "I need a token symbol.",
        ]));
        agent(provider.clone(), 5).ask("check").await.unwrap();

        let seen = provider.seen.lock().unwrap();
        let tool_msg = seen.last().unwrap().last().unwrap();
        assert!(tool_msg.content.starts_with("[Tool 'analyze_market' failed]"));
    }

    #[tokio::test]
    async fn stops_after_max_iterations() {
        let looping = "```tool\n{\"tool\": \"analyze_market\", \"arguments\": {\"tokenSymbol\": \"ETH\"}}\n```";
        let provider = Arc::new(ScriptedProvider::new(&[looping, looping, looping]));
        let err = agent(provider, 2).ask("loop").await.unwrap_err();
        assert!(matches!(err, AgentError::MaxIterations(2)));
    }
}
