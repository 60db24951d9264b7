//! RAG Assistant Core - Domain models, configuration and document loading
//!
//! This crate holds the error taxonomy shared by every other crate, the document
//! models, the YAML configuration layer, file-format readers and text processing.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod processing;

pub use error::{RagError, Result};
