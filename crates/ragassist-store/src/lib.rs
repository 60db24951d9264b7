//! RAG Assistant Store - Vector store ports and adapters
//!
//! Collections of embedded documents searched by cosine distance, kept either in
//! memory or as one JSON file per collection.

pub mod collection;
pub mod distance;
pub mod handle;
pub mod memory;
pub mod persistent;
pub mod ports;

pub use handle::StoreHandle;
pub use memory::MemoryVectorStore;
pub use persistent::PersistentVectorStore;
pub use ports::{Collection, QueryResult, VectorStore};
