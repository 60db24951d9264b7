//! RAG Assistant LLM - Embedding and chat ports
//!
//! This crate defines the embedding and chat-model ports, the native HTTP clients
//! for each supported backend, the provider abstraction that builds those clients,
//! and the adapter that gives every client one calling contract.

pub mod adapter;
pub mod clients;
pub mod embedding;
pub mod factory;
pub mod invoke;
pub mod ports;
pub mod providers;

mod http;

// Re-export main types
pub use adapter::LlmClientAdapter;
pub use embedding::{create_embedder, OllamaEmbedder, OpenAiEmbedder};
pub use factory::LlmFactory;
pub use invoke::{ChatResponse, InvokeOptions, PromptArgument, ProviderOptions};
pub use ports::{ChatModel, Embedder};
pub use providers::LlmProvider;
