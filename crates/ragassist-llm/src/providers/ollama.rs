use ragassist_core::error::Result;

use super::{resolve_model, LlmProvider};
use crate::adapter::LlmClientAdapter;
use crate::clients::OllamaChat;
use crate::embedding::ollama::DEFAULT_OLLAMA_URL;
use crate::invoke::ProviderOptions;

/// Local Ollama server; needs no credential
pub struct OllamaProvider {
    base_url: String,
}

impl OllamaProvider {
    /// Use `OLLAMA_BASE_URL` when set
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model_name(&self) -> &str {
        "llama3"
    }

    fn credential_variable(&self) -> Option<&str> {
        None
    }

    fn has_credential(&self) -> bool {
        true
    }

    fn create_llm(
        &self,
        model_name: Option<&str>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Result<LlmClientAdapter> {
        let model = resolve_model(model_name, self.default_model_name());

        let client = OllamaChat::new(&self.base_url, model, temperature, options);
        Ok(LlmClientAdapter::new(Box::new(client)))
    }
}
