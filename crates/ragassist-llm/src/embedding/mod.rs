//! Embedding function implementations

use std::sync::Arc;

use ragassist_core::error::{RagError, Result};

use crate::ports::Embedder;

pub mod ollama;
pub mod openai;

pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;

/// Build an embedder from a `provider:model` spec such as `ollama:nomic-embed-text`
///
/// A bare model name is treated as an Ollama model.
pub fn create_embedder(spec: &str, dimensions: usize) -> Result<Arc<dyn Embedder>> {
    let (provider, model) = spec.split_once(':').unwrap_or(("ollama", spec));

    if model.trim().is_empty() {
        return Err(RagError::ConfigInvalid {
            key: "embedding.model".to_string(),
            reason: format!("'{}' does not name a model", spec),
        });
    }

    match provider.to_lowercase().as_str() {
        "ollama" => Ok(Arc::new(OllamaEmbedder::from_env(model, dimensions))),
        "openai" => Ok(Arc::new(OpenAiEmbedder::from_env(model, dimensions)?)),
        other => Err(RagError::ConfigInvalid {
            key: "embedding.model".to_string(),
            reason: format!("unknown embedding provider '{}', expected ollama or openai", other),
        }),
    }
}

/// Check that a backend returned one vector per input
pub(crate) fn check_count(provider: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RagError::Embedding {
            reason: format!("{} returned {} embeddings for {} inputs", provider, actual, expected),
            remediation: "Retry the request or check the embedding model".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_create_ollama_embedder() {
        let embedder = create_embedder("ollama:nomic-embed-text", 768).unwrap();
        assert_eq!(embedder.model_name(), "nomic-embed-text");
        assert_eq!(embedder.dimensions(), 768);
    }

    #[test]
    #[serial]
    fn test_bare_model_defaults_to_ollama() {
        let embedder = create_embedder("all-minilm", 384).unwrap();
        assert_eq!(embedder.model_name(), "all-minilm");
    }

    #[test]
    fn test_unknown_provider() {
        let err = create_embedder("cohere:embed-v3", 1024).err().unwrap();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_empty_model() {
        assert!(create_embedder("ollama:", 768).is_err());
    }

    #[test]
    fn test_count_mismatch() {
        assert!(check_count("Ollama", 2, 2).is_ok());
        assert!(matches!(check_count("Ollama", 2, 1), Err(RagError::Embedding { .. })));
    }
}
