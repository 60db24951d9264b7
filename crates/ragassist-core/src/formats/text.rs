use std::path::Path;

use crate::error::Result;
use crate::formats::{read_utf8, FormatReader, LoadedFile};

/// Plain text reader
pub struct PlainTextReader;

impl FormatReader for PlainTextReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        read_utf8(path, self.format_name()).map(LoadedFile::Text)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn format_name(&self) -> &str {
        "Text"
    }
}

/// Markdown reader; content is kept verbatim
pub struct MarkdownReader;

impl FormatReader for MarkdownReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        read_utf8(path, self.format_name()).map(LoadedFile::Text)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md"]
    }

    fn format_name(&self) -> &str {
        "Markdown"
    }
}
