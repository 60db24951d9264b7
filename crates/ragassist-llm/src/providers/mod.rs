//! LLM provider abstraction
//!
//! A provider knows which credential it needs and how to build its native chat
//! client. Credentials are read once at construction; a missing credential only
//! surfaces when `create_llm` is called.

use ragassist_core::error::{RagError, Result};

use crate::adapter::LlmClientAdapter;
use crate::invoke::ProviderOptions;

pub mod google;
pub mod groq;
pub mod ollama;
pub mod openai;

pub use google::GoogleProvider;
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

pub trait LlmProvider: Send + Sync {
    /// Registry key, lowercase (e.g. "openai")
    fn name(&self) -> &str;

    /// Model used when `create_llm` gets no model name
    fn default_model_name(&self) -> &str;

    /// Environment variable holding the API key, if the backend needs one
    fn credential_variable(&self) -> Option<&str>;

    /// Whether a usable credential was found at construction
    fn has_credential(&self) -> bool;

    /// Build a native client wrapped in the invocation adapter
    fn create_llm(
        &self,
        model_name: Option<&str>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Result<LlmClientAdapter>;
}

/// Read an API key from the environment, treating blank values as absent
pub(crate) fn read_credential(variable: &str) -> Option<String> {
    std::env::var(variable).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn require_credential<'a>(
    provider: &str,
    variable: &str,
    api_key: &'a Option<String>,
) -> Result<&'a str> {
    api_key.as_deref().ok_or_else(|| RagError::MissingCredential {
        provider: provider.to_string(),
        variable: variable.to_string(),
    })
}

/// Resolve an optional model name against a provider default
pub(crate) fn resolve_model<'a>(model_name: Option<&'a str>, default: &'a str) -> &'a str {
    model_name.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_model() {
        assert_eq!(resolve_model(None, "llama3"), "llama3");
        assert_eq!(resolve_model(Some("  "), "llama3"), "llama3");
        assert_eq!(resolve_model(Some("mistral"), "llama3"), "mistral");
    }

    #[test]
    fn test_require_credential() {
        let missing: Option<String> = None;
        let err = require_credential("Groq", "GROQ_API_KEY", &missing).unwrap_err();
        assert!(matches!(err, RagError::MissingCredential { ref variable, .. } if variable == "GROQ_API_KEY"));

        let present = Some("k".to_string());
        assert_eq!(require_credential("Groq", "GROQ_API_KEY", &present).unwrap(), "k");
    }
}
