pub mod document;
pub mod query;

pub use document::{DocumentRecord, Metadata, TextChunk};
pub use query::{Include, RetrievedDocument};
