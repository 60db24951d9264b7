//! RAG Assistant Retrieval - Search, prompting and ingestion
//!
//! This crate implements the retrieval use cases: embedding a question, searching a
//! collection, filtering by distance, building the final prompt, and filling
//! collections from documents on disk.

pub mod ingest;
pub mod prompt;
pub mod respond;
pub mod retriever;

pub use ingest::{IngestPhase, IngestPipeline, IngestProgress, IngestReport};
pub use prompt::{build_prompt, build_rag_input, load_prompt_config, PromptConfig, PromptValue};
pub use respond::respond_to_query;
pub use retriever::Retriever;
