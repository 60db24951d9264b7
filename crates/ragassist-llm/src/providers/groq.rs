use ragassist_core::error::Result;

use super::{read_credential, require_credential, resolve_model, LlmProvider};
use crate::adapter::LlmClientAdapter;
use crate::clients::openai_compat::{OpenAiCompatibleChat, GROQ_BASE_URL};
use crate::invoke::ProviderOptions;

const CREDENTIAL: &str = "GROQ_API_KEY";

/// Groq serves an OpenAI-compatible API
pub struct GroqProvider {
    api_key: Option<String>,
}

impl GroqProvider {
    pub fn from_env() -> Self {
        Self::with_api_key(read_credential(CREDENTIAL))
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn default_model_name(&self) -> &str {
        "llama-3.1-8b-instant"
    }

    fn credential_variable(&self) -> Option<&str> {
        Some(CREDENTIAL)
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn create_llm(
        &self,
        model_name: Option<&str>,
        temperature: f32,
        options: ProviderOptions,
    ) -> Result<LlmClientAdapter> {
        let api_key = require_credential("Groq", CREDENTIAL, &self.api_key)?;
        let model = resolve_model(model_name, self.default_model_name());

        let client =
            OpenAiCompatibleChat::new("Groq", GROQ_BASE_URL, api_key, model, temperature, options);
        Ok(LlmClientAdapter::new(Box::new(client)))
    }
}
