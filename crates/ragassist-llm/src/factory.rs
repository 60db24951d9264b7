//! Registry of LLM providers keyed by lowercase name

use ragassist_core::error::{RagError, Result};

use crate::providers::{GoogleProvider, GroqProvider, LlmProvider, OllamaProvider, OpenAiProvider};

/// Closed set of providers, kept in registration order
pub struct LlmFactory {
    providers: Vec<(String, Box<dyn LlmProvider>)>,
}

impl LlmFactory {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { providers: Vec::new() }
    }

    /// Registry with openai, ollama, google and groq, reading credentials from the environment
    pub fn with_default_providers() -> Self {
        let mut factory = Self::new();
        factory.register(Box::new(OpenAiProvider::from_env()));
        factory.register(Box::new(OllamaProvider::from_env()));
        factory.register(Box::new(GoogleProvider::from_env()));
        factory.register(Box::new(GroqProvider::from_env()));
        factory
    }

    /// Register a provider; an existing entry with the same name is replaced in place
    pub fn register(&mut self, provider: Box<dyn LlmProvider>) {
        let name = provider.name().to_lowercase();
        match self.providers.iter().position(|(existing, _)| *existing == name) {
            Some(index) => self.providers[index].1 = provider,
            None => self.providers.push((name, provider)),
        }
    }

    /// Look up a provider by case-insensitive name
    pub fn get_llm_provider(&self, name: &str) -> Result<&dyn LlmProvider> {
        let key = name.trim().to_lowercase();
        self.providers
            .iter()
            .find(|(registered, _)| *registered == key)
            .map(|(_, provider)| provider.as_ref())
            .ok_or_else(|| RagError::UnsupportedProvider {
                name: name.to_string(),
                available: self.get_supported_providers(),
            })
    }

    /// Registered names in registration order
    pub fn get_supported_providers(&self) -> Vec<String> {
        self.providers.iter().map(|(name, _)| name.clone()).collect()
    }

    /// All registered providers in registration order
    pub fn providers(&self) -> impl Iterator<Item = &dyn LlmProvider> {
        self.providers.iter().map(|(_, provider)| provider.as_ref())
    }
}

impl Default for LlmFactory {
    fn default() -> Self {
        Self::new()
    }
}
