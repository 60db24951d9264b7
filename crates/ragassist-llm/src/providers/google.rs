use ragassist_core::error::Result;

use super::{read_credential, require_credential, resolve_model, LlmProvider};
use crate::adapter::LlmClientAdapter;
use crate::clients::GeminiChat;
use crate::invoke::ProviderOptions;

const CREDENTIAL: &str = "GOOGLE_API_KEY";

/// Gemini models through the Generative Language API
pub struct GoogleProvider {
    api_key: Option<String>,
}

impl GoogleProvider {
    pub fn from_env() -> Self {
        Self::with_api_key(read_credential(CREDENTIAL))
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl LlmProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn default_model_name(&self) -> &str {
        "gemini-2.5-flash"
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
        let api_key = require_credential("Gemini", CREDENTIAL, &self.api_key)?;
        let model = resolve_model(model_name, self.default_model_name());

        let client = GeminiChat::new(api_key, model, temperature, options);
        Ok(LlmClientAdapter::new(Box::new(client)))
    }
}
