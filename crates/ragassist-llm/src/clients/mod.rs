//! Native chat clients, one per backend API

pub mod gemini;
pub mod ollama;
pub mod openai_compat;

pub use gemini::GeminiChat;
pub use ollama::OllamaChat;
pub use openai_compat::OpenAiCompatibleChat;

use ragassist_core::error::RagError;

fn transport_error(provider: &str, error: impl std::fmt::Display) -> RagError {
    RagError::Invocation { provider: provider.to_string(), message: format!("request failed: {}", error) }
}

fn runtime_error(provider: &str, error: std::io::Error) -> RagError {
    RagError::Invocation {
        provider: provider.to_string(),
        message: format!("failed to create async runtime: {}", error),
    }
}
