use std::sync::Arc;

use ragassist_core::error::Result;
use ragassist_core::models::{DocumentRecord, Include, Metadata};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Port for a store of named collections
pub trait VectorStore: Send + Sync {
    /// Open an existing collection; absence is `Ok(None)`, never an error
    fn get_collection(&self, name: &str) -> Result<Option<Arc<dyn Collection>>>;

    /// Open a collection, creating it empty when missing
    fn get_or_create_collection(&self, name: &str) -> Result<Arc<dyn Collection>>;

    /// Delete a collection, returning whether it existed
    fn delete_collection(&self, name: &str) -> Result<bool>;

    /// Names of all collections, sorted
    fn list_collections(&self) -> Result<Vec<String>>;
}

/// Port for one collection of embedded documents sharing an embedding space
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Number of stored records
    fn count(&self) -> Result<usize>;

    /// Embedding dimensionality, fixed by the first stored record
    fn dimensions(&self) -> Result<Option<usize>>;

    /// Insert new records; any id already present fails the whole batch
    fn add(&self, records: Vec<DocumentRecord>) -> Result<()>;

    /// Insert or replace records by id
    fn upsert(&self, records: Vec<DocumentRecord>) -> Result<()>;

    /// Fetch records by id, skipping unknown ids
    fn get(&self, ids: &[&str]) -> Result<Vec<DocumentRecord>>;

    /// Remove records by id, returning how many existed
    fn delete(&self, ids: &[&str]) -> Result<usize>;

    /// Remove every record whose metadata `key` equals one of `values`
    fn delete_where(&self, key: &str, values: &[Value]) -> Result<usize>;

    /// Nearest records for each query embedding, by ascending cosine distance
    ///
    /// Ties keep insertion order. `n_results` must be at least 1.
    fn query(
        &self,
        query_embeddings: &[Vec<f32>],
        n_results: usize,
        include: &[Include],
    ) -> Result<QueryResult>;
}

/// Query output with one outer entry per query embedding
///
/// Optional fields are only populated when requested through `Include`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,
    pub documents: Option<Vec<Vec<String>>>,
    pub distances: Option<Vec<Vec<f32>>>,
    pub metadatas: Option<Vec<Vec<Metadata>>>,
    pub embeddings: Option<Vec<Vec<Vec<f32>>>>,
}
