use std::path::Path;

use crate::error::{RagError, Result};
use crate::formats::{FormatReader, LoadedFile};

/// PDF format reader
pub struct PdfReader;

impl FormatReader for PdfReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        let text =
            pdf_extract::extract_text(path).map_err(|e| RagError::DocumentExtraction {
                format: "PDF".to_string(),
                reason: format!("Failed to extract text: {}", e),
            })?;

        // Handle empty PDFs with warning
        if text.trim().is_empty() {
            tracing::warn!("PDF contains no extractable text: {}", path.display());
        } else {
            tracing::debug!(
                "Extracted {} words from ~{} pages of {}",
                text.split_whitespace().count(),
                estimate_page_count(&text),
                path.display()
            );
        }

        Ok(LoadedFile::Text(text))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn format_name(&self) -> &str {
        "PDF"
    }
}

/// Estimate page count from extracted text
fn estimate_page_count(text: &str) -> usize {
    // Form feeds mark page breaks
    let form_feeds = text.chars().filter(|&c| c == '\x0C').count();

    if form_feeds > 0 {
        form_feeds + 1
    } else {
        // Roughly 3000 characters per page
        let estimated = (text.chars().count() as f64 / 3000.0).ceil() as usize;
        estimated.max(1)
    }
}
