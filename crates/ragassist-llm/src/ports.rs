//! LLM port definitions

use ragassist_core::error::Result;

use crate::invoke::{ChatResponse, InvokeOptions, PromptArgument};

/// Port for embedding text into vector representations
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Slice of text strings to embed
    ///
    /// # Returns
    /// Vector of embedding vectors, one per input text, in input order
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Get the dimensionality of embeddings produced by this embedder
    fn dimensions(&self) -> usize;

    /// Get the name/identifier of the embedding model
    fn model_name(&self) -> &str;
}

/// Port for a provider-native chat client
///
/// Each backend accepts the prompt under its own calling convention. A client
/// handed a convention it does not accept must fail with
/// `RagError::ArgumentMismatch` before doing any I/O.
pub trait ChatModel: Send + Sync {
    /// Send a single prompt and return the model's reply
    fn invoke(&self, prompt: PromptArgument<'_>, options: &InvokeOptions) -> Result<ChatResponse>;

    /// Model identifier used for requests
    fn model_name(&self) -> &str;

    /// Display name of the backend (e.g. "OpenAI")
    fn provider(&self) -> &str;
}
