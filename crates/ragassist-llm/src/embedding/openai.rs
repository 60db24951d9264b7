//! OpenAI embeddings (`/v1/embeddings`), one batched request per call

use ragassist_core::error::{RagError, Result};
use serde::{Deserialize, Serialize};

use crate::embedding::check_count;
use crate::http::{block_on, error_detail};
use crate::ports::Embedder;

const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::MissingCredential {
                provider: "OpenAI".to_string(),
                variable: "OPENAI_API_KEY".to_string(),
            });
        }

        Ok(Self { client: reqwest::Client::new(), api_key, model: model.into(), dimensions })
    }

    /// Create using the `OPENAI_API_KEY` environment variable
    pub fn from_env(model: impl Into<String>, dimensions: usize) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(api_key, model, dimensions)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: Some(self.dimensions).filter(|d| *d > 0),
        };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = "OpenAI", error = %e, "embedding request failed");
                RagError::Embedding {
                    reason: format!("request failed: {}", e),
                    remediation: "Check network access to api.openai.com".to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding {
                reason: format!("OpenAI API returned {}: {}", status, error_detail(&body)),
                remediation: "Check OPENAI_API_KEY and the embedding model name".to_string(),
            });
        }

        let embedding_response: EmbeddingResponse =
            response.json().await.map_err(|e| RagError::Embedding {
                reason: format!("failed to parse response: {}", e),
                remediation: "Check OpenAI API compatibility".to_string(),
            })?;

        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(provider = "OpenAI", batch_size = texts.len(), model = %self.model, "embedding batch");

        let embeddings = block_on(self.embed_batch(texts)).map_err(|e| RagError::Embedding {
            reason: format!("Failed to create async runtime: {}", e),
            remediation: "Ensure the process can spawn threads".to_string(),
        })??;

        check_count("OpenAI", texts.len(), embeddings.len())?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}
