use std::sync::Arc;

use ragassist_core::error::{RagError, Result};
use ragassist_core::models::{Include, RetrievedDocument};
use ragassist_llm::ports::Embedder;
use ragassist_store::StoreHandle;

/// Embeds a question and returns the stored documents close enough to it
pub struct Retriever {
    store: Arc<StoreHandle>,
    embedder: Arc<dyn Embedder>,
    collection_name: String,
}

impl Retriever {
    pub fn new(
        store: Arc<StoreHandle>,
        embedder: Arc<dyn Embedder>,
        collection_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            embedder,
            collection_name: collection_name.into(),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Texts of the documents whose distance to `query` is below `threshold`
    ///
    /// At most `top_k` documents are returned, nearest first. A missing collection or
    /// an empty search result yields an empty list.
    pub fn retrieve(&self, query: &str, top_k: usize, threshold: f32) -> Result<Vec<String>> {
        Ok(self
            .retrieve_scored(query, top_k, threshold)?
            .into_iter()
            .map(|doc| doc.text)
            .collect())
    }

    /// Same as [`Retriever::retrieve`], keeping ids and distances
    pub fn retrieve_scored(
        &self,
        query: &str,
        top_k: usize,
        threshold: f32,
    ) -> Result<Vec<RetrievedDocument>> {
        if top_k == 0 {
            return Err(RagError::InvalidArgument {
                name: "top_k".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        tracing::debug!("Retrieving relevant documents for query: {}", query);
        let query_embedding = self.embed_query(query)?;

        let store = self.store.get()?;
        let Some(collection) = store.get_collection(&self.collection_name)? else {
            tracing::warn!(
                "Collection '{}' does not exist. Run ingestion first.",
                self.collection_name
            );
            return Ok(Vec::new());
        };

        tracing::info!("Querying collection '{}'...", self.collection_name);
        let results = collection
            .query(&[query_embedding], top_k, &[Include::Documents, Include::Distances])
            .map_err(|e| match e {
                RagError::DimensionMismatch { expected, actual } => RagError::Embedding {
                    reason: format!(
                        "query embedding has {} dimensions but collection '{}' stores {}",
                        actual, self.collection_name, expected
                    ),
                    remediation: format!(
                        "Re-ingest '{}' with {} or switch back to the embedder it was built with",
                        self.collection_name,
                        self.embedder.model_name()
                    ),
                },
                other => other,
            })?;

        let (Some(ids), Some(documents), Some(distances)) = (
            results.ids.first(),
            results.documents.as_ref().and_then(|d| d.first()),
            results.distances.as_ref().and_then(|d| d.first()),
        ) else {
            tracing::warn!("No results found.");
            return Ok(Vec::new());
        };

        if ids.is_empty() || documents.is_empty() || distances.is_empty() {
            tracing::warn!("No results found.");
            return Ok(Vec::new());
        }

        tracing::debug!("Filtering {} results with threshold {}", ids.len(), threshold);
        let relevant: Vec<RetrievedDocument> = ids
            .iter()
            .zip(documents)
            .zip(distances)
            .filter(|(_, distance)| **distance < threshold)
            .map(|((id, text), distance)| RetrievedDocument {
                id: id.clone(),
                text: text.clone(),
                distance: *distance,
            })
            .collect();

        tracing::debug!("Kept {} of {} results", relevant.len(), ids.len());
        Ok(relevant)
    }

    fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        tracing::debug!("Embedding query with {}", self.embedder.model_name());

        let vectors = self.embedder.embed(&[query]).map_err(|e| match e {
            RagError::Embedding { .. } => e,
            other => RagError::Embedding {
                reason: other.to_string(),
                remediation: "Check that the embedding service is reachable".to_string(),
            },
        })?;

        match vectors.into_iter().next() {
            Some(vector) if !vector.is_empty() => Ok(vector),
            _ => Err(RagError::Embedding {
                reason: "embedder returned no vector for the query".to_string(),
                remediation: "Check the embedding model configuration".to_string(),
            }),
        }
    }
}
