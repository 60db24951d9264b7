use serde::{Deserialize, Serialize};

/// Free-form metadata attached to stored documents
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Embedded document stored in a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Identifier, unique within its collection
    pub id: String,

    /// Document text returned to the prompt
    pub text: String,

    /// Embedding vector
    pub embedding: Vec<f32>,

    /// Additional properties (source path, chunk index, ...)
    #[serde(default)]
    pub metadata: Metadata,
}

impl DocumentRecord {
    pub fn new(id: impl Into<String>, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            embedding,
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Text chunk extracted from a source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Position of the chunk within its document
    pub index: usize,

    /// Chunk text
    pub content: String,

    /// Character offset in the source text
    pub offset: usize,
}
