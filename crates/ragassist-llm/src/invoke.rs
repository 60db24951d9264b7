//! Types shared by chat clients and the invocation adapter

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-call options merged into the request body (e.g. `max_tokens`)
pub type InvokeOptions = Map<String, Value>;

/// Options fixed when a client is created and sent with every request
pub type ProviderOptions = Map<String, Value>;

/// The shape in which a prompt is handed to a native client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptArgument<'a> {
    /// Prompt passed as the first positional argument
    Positional(&'a str),

    /// Prompt passed under an explicit parameter name
    Named { name: &'a str, value: &'a str },
}

impl<'a> PromptArgument<'a> {
    /// Named form used by the adapter's fallback call
    pub fn input(value: &'a str) -> Self {
        PromptArgument::Named { name: "input", value }
    }

    /// Prompt text regardless of the convention
    pub fn text(&self) -> &'a str {
        match self {
            PromptArgument::Positional(text) => text,
            PromptArgument::Named { value, .. } => value,
        }
    }

    /// Short description used in error messages
    pub fn convention(&self) -> String {
        match self {
            PromptArgument::Positional(_) => "positional".to_string(),
            PromptArgument::Named { name, .. } => format!("named '{}'", name),
        }
    }
}

/// Reply from a chat model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,

    /// Model that produced the reply, as reported by the backend
    pub model: String,

    /// Raw response payload
    #[serde(default)]
    pub metadata: Value,
}

impl ChatResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self { content: content.into(), model: model.into(), metadata: Value::Null }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}
