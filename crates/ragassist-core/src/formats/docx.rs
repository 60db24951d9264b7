//! DOCX format reader implementation
//!
//! Text extraction from Word documents using docx-rs. Paragraphs are joined with
//! newlines; table rows become `cell | cell` lines.

use std::path::Path;

use crate::error::{RagError, Result};
use crate::formats::{FormatReader, LoadedFile};

/// DOCX format reader
pub struct DocxReader;

impl FormatReader for DocxReader {
    fn read(&self, path: &Path) -> Result<LoadedFile> {
        let bytes = std::fs::read(path).map_err(|e| RagError::DocumentExtraction {
            format: "DOCX".to_string(),
            reason: format!("Failed to read file: {}", e),
        })?;

        let docx = docx_rs::read_docx(&bytes).map_err(|e| RagError::DocumentExtraction {
            format: "DOCX".to_string(),
            reason: format!("Failed to parse DOCX: {}", e),
        })?;

        let mut blocks = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    blocks.push(extract_paragraph_text(p));
                }
                docx_rs::DocumentChild::Table(t) => {
                    let table_text = extract_table_text(t);
                    if !table_text.trim().is_empty() {
                        blocks.push(table_text);
                    }
                }
                _ => {}
            }
        }

        let text = blocks.join("\n");
        if text.trim().is_empty() {
            tracing::warn!("DOCX contains no extractable text: {}", path.display());
        }

        Ok(LoadedFile::Text(text))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn format_name(&self) -> &str {
        "DOCX"
    }
}

fn extract_paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::ParagraphChild::Run(run) => Some(extract_run_text(run)),
            _ => None,
        })
        .collect()
}

fn extract_run_text(run: &docx_rs::Run) -> String {
    run.children
        .iter()
        .filter_map(|child| match child {
            docx_rs::RunChild::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}

fn extract_table_text(table: &docx_rs::Table) -> String {
    let mut lines = Vec::new();

    for row_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row_child;
        let mut cells = Vec::new();

        for cell_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell_child;
            let cell_text = cell
                .children
                .iter()
                .filter_map(|child| match child {
                    docx_rs::TableCellContent::Paragraph(p) => Some(extract_paragraph_text(p)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");

            if !cell_text.trim().is_empty() {
                cells.push(cell_text);
            }
        }

        if !cells.is_empty() {
            lines.push(cells.join(" | "));
        }
    }

    lines.join("\n")
}
