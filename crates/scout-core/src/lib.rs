//! # scout-core
//!
//! Capability registry, provider-agnostic LLM abstraction and the tool-calling
//! agent loop shared by the market-scout crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ToolAgent                             │
//! │  ┌─────────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │  Tool-call  │   │ ToolRegistry │   │   LlmProvider     │  │
//! │  │    loop     │──▶│ (schema +    │   │   (Strategy)      │  │
//! │  │             │◀──│  dispatch)   │   │                   │  │
//! │  └─────────────┘   └──────────────┘   └───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry holds no selection logic. HTTP callers invoke tools by name,
//! and the agent lets a language model choose.

pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{GenerationOptions, LlmProvider};
pub use reasoning::{AgentConfig, ToolAgent};
pub use tool::{ParamType, ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
