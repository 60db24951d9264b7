//! Ingestion: documents on disk into an embedded collection

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use ragassist_core::error::{RagError, Result};
use ragassist_core::formats::FormatRegistry;
use ragassist_core::models::DocumentRecord;
use ragassist_core::processing::TextSplitter;
use ragassist_llm::ports::Embedder;
use ragassist_store::Collection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Progress information for an ingestion run
#[derive(Debug, Clone)]
pub struct IngestProgress {
    pub phase: IngestPhase,
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Current phase of an ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestPhase {
    LoadingFiles,
    GeneratingEmbeddings,
    StoringRecords,
}

/// Summary of an ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Files loaded and chunked
    pub files: usize,

    /// Distinct records written to the collection
    pub chunks: usize,

    /// Files without a matching reader
    pub skipped: Vec<PathBuf>,
}

/// A chunk waiting for its embedding
struct PendingChunk {
    id: String,
    text: String,
    source: String,
    format: String,
    chunk_index: usize,
}

pub struct IngestPipeline {
    embedder: Arc<dyn Embedder>,
    splitter: TextSplitter,
    batch_size: usize,
    registry: FormatRegistry,
}

impl IngestPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, splitter: TextSplitter, batch_size: usize) -> Self {
        Self {
            embedder,
            splitter,
            batch_size: batch_size.max(1),
            registry: FormatRegistry::with_defaults(),
        }
    }

    /// Replace the default format readers
    pub fn with_registry(mut self, registry: FormatRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Ingest every supported file directly inside `dir`
    pub fn ingest_directory(&self, dir: &Path, collection: &dyn Collection) -> Result<IngestReport> {
        self.ingest_directory_with_progress(dir, collection, |_| {})
    }

    /// Ingest with progress reporting
    ///
    /// Files are processed in path order. Records previously stored for each loaded
    /// file are removed before the new chunks are upserted, so re-ingesting a file
    /// that shrank leaves no stale chunks behind. When two files produce the same
    /// chunk id, the later file wins and a warning names both.
    pub fn ingest_directory_with_progress<F>(
        &self,
        dir: &Path,
        collection: &dyn Collection,
        mut progress: F,
    ) -> Result<IngestReport>
    where
        F: FnMut(IngestProgress),
    {
        if !dir.is_dir() {
            return Err(RagError::FileNotFound { path: dir.to_path_buf() });
        }

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        files.retain(|path| path.is_file());
        files.sort();

        tracing::info!("Ingesting {} files from {}", files.len(), dir.display());

        let mut report = IngestReport::default();
        let mut pending: Vec<PendingChunk> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut sources: Vec<Value> = Vec::new();
        let total_files = files.len();

        for (idx, path) in files.iter().enumerate() {
            progress(IngestProgress {
                phase: IngestPhase::LoadingFiles,
                current: idx + 1,
                total: total_files,
                message: format!("Loading {}", path.display()),
            });

            let Ok(reader) = self.registry.detect_format(path) else {
                tracing::warn!("Skipping unsupported file: {}", path.display());
                report.skipped.push(path.clone());
                continue;
            };

            let text = reader.read(path)?.into_text()?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("document");
            let chunks = self.splitter.split(&text);
            tracing::debug!("{}: {} chunks", path.display(), chunks.len());

            let source = path.display().to_string();
            for chunk in chunks {
                let pending_chunk = PendingChunk {
                    id: format!("{}_{}", stem, chunk.index),
                    text: chunk.content,
                    source: source.clone(),
                    format: reader.format_name().to_string(),
                    chunk_index: chunk.index,
                };

                match positions.get(&pending_chunk.id).copied() {
                    Some(position) => {
                        tracing::warn!(
                            "Chunk id '{}' from {} overwrites the one from {}",
                            pending_chunk.id,
                            pending_chunk.source,
                            pending[position].source
                        );
                        pending[position] = pending_chunk;
                    }
                    None => {
                        positions.insert(pending_chunk.id.clone(), pending.len());
                        pending.push(pending_chunk);
                    }
                }
            }

            sources.push(Value::String(source));
            report.files += 1;
        }

        if pending.is_empty() {
            tracing::warn!("No text found to ingest in {}", dir.display());
        }

        let records = self.embed_with_progress(pending, &mut progress)?;

        if !sources.is_empty() {
            let removed = collection.delete_where("source", &sources)?;
            tracing::debug!("Removed {} previously stored records", removed);
        }

        if records.is_empty() {
            return Ok(report);
        }

        progress(IngestProgress {
            phase: IngestPhase::StoringRecords,
            current: 0,
            total: records.len(),
            message: format!("Storing {} records", records.len()),
        });

        report.chunks = records.len();
        collection.upsert(records)?;

        progress(IngestProgress {
            phase: IngestPhase::StoringRecords,
            current: report.chunks,
            total: report.chunks,
            message: "Ingestion complete".to_string(),
        });

        tracing::info!(
            "Ingested {} chunks from {} files into '{}' ({} skipped)",
            report.chunks,
            report.files,
            collection.name(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn embed_with_progress<F>(
        &self,
        pending: Vec<PendingChunk>,
        progress: &mut F,
    ) -> Result<Vec<DocumentRecord>>
    where
        F: FnMut(IngestProgress),
    {
        let total = pending.len();
        let ingested_at = Utc::now().to_rfc3339();
        let mut records = Vec::with_capacity(total);

        for (batch_idx, batch) in pending.chunks(self.batch_size).enumerate() {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let vectors = self.embedder.embed(&texts)?;

            if vectors.len() != texts.len() {
                return Err(RagError::Embedding {
                    reason: format!(
                        "expected {} embeddings, received {}",
                        texts.len(),
                        vectors.len()
                    ),
                    remediation: "Check the embedding service".to_string(),
                });
            }

            for (chunk, vector) in batch.iter().zip(vectors) {
                records.push(
                    DocumentRecord::new(chunk.id.clone(), chunk.text.clone(), vector)
                        .with_metadata("source", chunk.source.clone())
                        .with_metadata("format", chunk.format.clone())
                        .with_metadata("chunk_index", chunk.chunk_index)
                        .with_metadata("ingested_at", ingested_at.clone()),
                );
            }

            let processed = ((batch_idx + 1) * self.batch_size).min(total);
            progress(IngestProgress {
                phase: IngestPhase::GeneratingEmbeddings,
                current: processed,
                total,
                message: format!("Generated {}/{} embeddings", processed, total),
            });
        }

        Ok(records)
    }
}
