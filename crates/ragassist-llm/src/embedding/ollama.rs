use ragassist_core::error::{RagError, Result};
use serde::{Deserialize, Serialize};

use crate::embedding::check_count;
use crate::http::block_on;
use crate::ports::Embedder;

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama embedder implementation
pub struct OllamaEmbedder {
    /// Base URL for Ollama API (e.g., "http://localhost:11434")
    base_url: String,

    /// Model name to use for embeddings
    model: String,

    /// Embedding dimensions (model-specific)
    dimensions: usize,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost(model: impl Into<String>, dimensions: usize) -> Self {
        Self::new(DEFAULT_OLLAMA_URL, model, dimensions)
    }

    /// Create using `OLLAMA_BASE_URL` when set
    pub fn from_env(model: impl Into<String>, dimensions: usize) -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        Self::new(base_url, model, dimensions)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbedRequest { model: &self.model, prompt: text };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Embedding {
                reason: format!("Failed to connect to Ollama: {}", e),
                remediation: format!(
                    "Ensure Ollama is running at {} and the model '{}' is available. \
                     Run 'ollama pull {}' to download the model.",
                    self.base_url, self.model, self.model
                ),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding {
                reason: format!("Ollama API error ({}): {}", status, error_text),
                remediation: format!(
                    "Check that the model '{}' is available. Run 'ollama list' to see installed models.",
                    self.model
                ),
            });
        }

        let embed_response: OllamaEmbedResponse =
            response.json().await.map_err(|e| RagError::Embedding {
                reason: format!("Failed to parse Ollama response: {}", e),
                remediation: "Check Ollama API compatibility".to_string(),
            })?;

        Ok(embed_response.embedding)
    }
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(model = %self.model, batch_size = texts.len(), "embedding with Ollama");

        let embeddings = block_on(async {
            let mut embeddings = Vec::with_capacity(texts.len());
            for text in texts {
                embeddings.push(self.embed_one(text).await?);
            }
            Ok::<_, RagError>(embeddings)
        })
        .map_err(|e| RagError::Embedding {
            reason: format!("Failed to create async runtime: {}", e),
            remediation: "Ensure the process can spawn threads".to_string(),
        })??;

        check_count("Ollama", texts.len(), embeddings.len())?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for Ollama embeddings API
#[derive(Debug, Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response from Ollama embeddings API
#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    embedding: Vec<f32>,
}
