//! Text processing: chunking for ingestion and JSON to Markdown conversion

pub mod chunk;
pub mod markdown;

pub use chunk::TextSplitter;
pub use markdown::{create_markdown_from_entry, json_to_markdown, DEFAULT_NUM_ENTRIES};
