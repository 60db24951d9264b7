//! Format abstraction layer for document loading
//!
//! Each format implements the `FormatReader` trait, and the `FormatRegistry` manages
//! extension-based detection and dispatching to the appropriate reader.

use std::path::Path;

use crate::error::{RagError, Result};

pub mod docx;
pub mod pdf;
pub mod structured;
pub mod text;

pub use docx::DocxReader;
pub use pdf::PdfReader;
pub use structured::{JsonReader, YamlReader};
pub use text::{MarkdownReader, PlainTextReader};

/// Format reader trait that all format implementations must implement
pub trait FormatReader: Send + Sync {
    /// Read the file at `path`
    fn read(&self, path: &Path) -> Result<LoadedFile>;

    /// Get supported file extensions (lowercase, without the dot)
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "PDF", "Markdown")
    fn format_name(&self) -> &str;
}

/// Content produced by a format reader
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedFile {
    /// Plain text extracted from a document
    Text(String),

    /// Parsed YAML or JSON content
    Structured(serde_json::Value),
}

impl LoadedFile {
    /// Text used for chunking and embedding
    pub fn into_text(self) -> Result<String> {
        match self {
            LoadedFile::Text(text) => Ok(text),
            LoadedFile::Structured(value) => Ok(serde_json::to_string_pretty(&value)?),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LoadedFile::Text(text) => Some(text),
            LoadedFile::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            LoadedFile::Structured(value) => Some(value),
            LoadedFile::Text(_) => None,
        }
    }
}

/// Central registry for format readers
pub struct FormatRegistry {
    readers: Vec<Box<dyn FormatReader>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self { readers: Vec::new() }
    }

    /// Registry with every built-in reader
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlainTextReader));
        registry.register(Box::new(MarkdownReader));
        registry.register(Box::new(DocxReader));
        registry.register(Box::new(PdfReader));
        registry.register(Box::new(YamlReader));
        registry.register(Box::new(JsonReader));
        registry
    }

    /// Register a format reader
    pub fn register(&mut self, reader: Box<dyn FormatReader>) {
        self.readers.push(reader);
    }

    /// Detect format and return appropriate reader
    pub fn detect_format(&self, path: &Path) -> Result<&dyn FormatReader> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| RagError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: self.supported_formats(),
            })?;

        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension.as_str()))
            .map(|r| r.as_ref())
            .ok_or_else(|| RagError::UnsupportedFormat {
                extension: format!(".{}", extension),
                supported: self.supported_formats(),
            })
    }

    /// Whether any registered reader handles this path
    pub fn supports(&self, path: &Path) -> bool {
        self.detect_format(path).is_ok()
    }

    /// Check existence, detect the format and read the file
    pub fn load(&self, path: &Path) -> Result<LoadedFile> {
        if !path.exists() {
            return Err(RagError::FileNotFound { path: path.to_path_buf() });
        }

        let reader = self.detect_format(path)?;
        tracing::debug!("Loading {} as {}", path.display(), reader.format_name());
        reader.read(path)
    }

    /// Get list of all supported format extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get all registered readers
    pub fn readers(&self) -> &[Box<dyn FormatReader>] {
        &self.readers
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a txt, md, docx, pdf, yaml/yml or json file
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedFile> {
    FormatRegistry::with_defaults().load(path.as_ref())
}

/// Read a file to a UTF-8 string, reporting failures as extraction errors
pub(crate) fn read_utf8(path: &Path, format: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| RagError::DocumentExtraction {
        format: format.to_string(),
        reason: format!("Failed to read {}: {}", path.display(), e),
    })
}
