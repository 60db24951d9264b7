use serde::{Deserialize, Serialize};

/// Document returned by a retrieval, with its distance to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub text: String,

    /// Cosine distance to the query (lower is more similar)
    pub distance: f32,
}

/// Fields a collection query should return alongside ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Include {
    Documents,
    Distances,
    Metadatas,
    Embeddings,
}
