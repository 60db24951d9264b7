//! Collection state shared by the in-memory and on-disk stores

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use ragassist_core::error::{RagError, Result};
use ragassist_core::models::{DocumentRecord, Include};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::distance::cosine_distance;
use crate::ports::{Collection, QueryResult};

/// Serializable contents of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionData {
    pub name: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub dimensions: Option<usize>,

    /// Records in insertion order
    pub records: Vec<DocumentRecord>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl CollectionData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            dimensions: None,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Rebuild the id index after deserialization
    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();
    }

    /// Check record dimensions against the collection and each other
    fn check_dimensions(&self, records: &[DocumentRecord]) -> Result<Option<usize>> {
        let mut expected = self.dimensions;

        for record in records {
            if record.embedding.is_empty() {
                return Err(RagError::InvalidArgument {
                    name: "embedding".to_string(),
                    reason: format!("record '{}' has an empty embedding", record.id),
                });
            }

            match expected {
                Some(dims) if dims != record.embedding.len() => {
                    return Err(RagError::DimensionMismatch {
                        expected: dims,
                        actual: record.embedding.len(),
                    });
                }
                Some(_) => {}
                None => expected = Some(record.embedding.len()),
            }
        }

        Ok(expected)
    }

    fn add(&mut self, records: Vec<DocumentRecord>) -> Result<()> {
        let mut seen = HashSet::new();
        for record in &records {
            if self.index.contains_key(&record.id) || !seen.insert(record.id.as_str()) {
                return Err(RagError::DuplicateDocument {
                    id: record.id.clone(),
                    collection: self.name.clone(),
                });
            }
        }

        self.dimensions = self.check_dimensions(&records)?;
        for record in records {
            self.index.insert(record.id.clone(), self.records.len());
            self.records.push(record);
        }
        Ok(())
    }

    fn upsert(&mut self, records: Vec<DocumentRecord>) -> Result<()> {
        self.dimensions = self.check_dimensions(&records)?;

        for record in records {
            match self.index.get(&record.id) {
                Some(&position) => self.records[position] = record,
                None => {
                    self.index.insert(record.id.clone(), self.records.len());
                    self.records.push(record);
                }
            }
        }
        Ok(())
    }

    /// Drop the matching records, keeping the rest in insertion order
    fn remove(&mut self, mut matches: impl FnMut(&DocumentRecord) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !matches(record));
        let removed = before - self.records.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn get(&self, ids: &[&str]) -> Vec<DocumentRecord> {
        ids.iter()
            .filter_map(|id| self.index.get(*id))
            .map(|&position| self.records[position].clone())
            .collect()
    }

    fn query(
        &self,
        query_embeddings: &[Vec<f32>],
        n_results: usize,
        include: &[Include],
    ) -> Result<QueryResult> {
        if n_results == 0 {
            return Err(RagError::InvalidArgument {
                name: "n_results".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let wants = |what: Include| include.contains(&what);
        let mut result = QueryResult {
            ids: Vec::with_capacity(query_embeddings.len()),
            documents: wants(Include::Documents).then(Vec::new),
            distances: wants(Include::Distances).then(Vec::new),
            metadatas: wants(Include::Metadatas).then(Vec::new),
            embeddings: wants(Include::Embeddings).then(Vec::new),
        };

        for query in query_embeddings {
            if let Some(dims) = self.dimensions {
                if dims != query.len() {
                    return Err(RagError::DimensionMismatch { expected: dims, actual: query.len() });
                }
            }

            let mut scored: Vec<(usize, f32)> = self
                .records
                .iter()
                .enumerate()
                .map(|(position, record)| (position, cosine_distance(query, &record.embedding)))
                .collect();

            // Stable sort keeps insertion order among equal distances
            scored.sort_by(|a, b| a.1.total_cmp(&b.1));
            scored.truncate(n_results);

            let hits: Vec<&DocumentRecord> = scored.iter().map(|(p, _)| &self.records[*p]).collect();

            result.ids.push(hits.iter().map(|r| r.id.clone()).collect());
            if let Some(documents) = result.documents.as_mut() {
                documents.push(hits.iter().map(|r| r.text.clone()).collect());
            }
            if let Some(distances) = result.distances.as_mut() {
                distances.push(scored.iter().map(|(_, d)| *d).collect());
            }
            if let Some(metadatas) = result.metadatas.as_mut() {
                metadatas.push(hits.iter().map(|r| r.metadata.clone()).collect());
            }
            if let Some(embeddings) = result.embeddings.as_mut() {
                embeddings.push(hits.iter().map(|r| r.embedding.clone()).collect());
            }
        }

        Ok(result)
    }
}

/// A collection guarded by a lock, optionally mirrored to a JSON file
pub struct StoredCollection {
    name: String,
    data: RwLock<CollectionData>,
    file: Option<PathBuf>,
}

impl StoredCollection {
    /// Collection that lives only in memory
    pub fn in_memory(name: &str) -> Self {
        Self { name: name.to_string(), data: RwLock::new(CollectionData::new(name)), file: None }
    }

    /// New collection written to `file` immediately
    pub fn create_file_backed(name: &str, file: PathBuf) -> Result<Self> {
        let collection =
            Self { name: name.to_string(), data: RwLock::new(CollectionData::new(name)), file: Some(file) };
        collection.persist(&*collection.read()?)?;
        Ok(collection)
    }

    /// Load a collection previously written to `file`
    pub fn load(file: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&file)?;
        let mut data: CollectionData = serde_json::from_str(&content).map_err(|e| {
            RagError::Store(format!("Corrupted collection file {}: {}", file.display(), e))
        })?;
        data.reindex();

        Ok(Self { name: data.name.clone(), data: RwLock::new(data), file: Some(file) })
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CollectionData>> {
        self.data.read().map_err(|_| lock_poisoned(&self.name))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CollectionData>> {
        self.data.write().map_err(|_| lock_poisoned(&self.name))
    }

    /// Rewrite the backing file, if any, through a temporary file
    fn persist(&self, data: &CollectionData) -> Result<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        let tmp = file.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(data)?)?;
        fs::rename(&tmp, file)?;

        tracing::debug!("Wrote {} records to {}", data.records.len(), file.display());
        Ok(())
    }

    /// Remove matching records; nothing is rewritten when none match
    fn remove_matching(&self, matches: impl Fn(&DocumentRecord) -> bool) -> Result<usize> {
        if !self.read()?.records.iter().any(&matches) {
            return Ok(0);
        }

        let mut removed = 0;
        self.mutate(|data| {
            removed = data.remove(&matches);
            Ok(())
        })?;
        Ok(removed)
    }

    /// Apply a mutation to a copy, persist it, then swap it in
    fn mutate(&self, f: impl FnOnce(&mut CollectionData) -> Result<()>) -> Result<()> {
        let mut guard = self.write()?;
        let mut updated = guard.clone();
        f(&mut updated)?;
        self.persist(&updated)?;
        *guard = updated;
        Ok(())
    }
}

impl Collection for StoredCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.records.len())
    }

    fn dimensions(&self) -> Result<Option<usize>> {
        Ok(self.read()?.dimensions)
    }

    fn add(&self, records: Vec<DocumentRecord>) -> Result<()> {
        self.mutate(|data| data.add(records))
    }

    fn upsert(&self, records: Vec<DocumentRecord>) -> Result<()> {
        self.mutate(|data| data.upsert(records))
    }

    fn get(&self, ids: &[&str]) -> Result<Vec<DocumentRecord>> {
        Ok(self.read()?.get(ids))
    }

    fn delete(&self, ids: &[&str]) -> Result<usize> {
        let ids: HashSet<&str> = ids.iter().copied().collect();
        self.remove_matching(|record| ids.contains(record.id.as_str()))
    }

    fn delete_where(&self, key: &str, values: &[Value]) -> Result<usize> {
        self.remove_matching(|record| {
            record.metadata.get(key).is_some_and(|value| values.contains(value))
        })
    }

    fn query(
        &self,
        query_embeddings: &[Vec<f32>],
        n_results: usize,
        include: &[Include],
    ) -> Result<QueryResult> {
        self.read()?.query(query_embeddings, n_results, include)
    }
}

fn lock_poisoned(name: &str) -> RagError {
    RagError::Store(format!("collection '{}' lock poisoned", name))
}

/// Collection names double as file names
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(RagError::InvalidArgument {
            name: "collection".to_string(),
            reason: format!(
                "'{}' must be non-empty and use only letters, digits, '_', '-' or '.'",
                name
            ),
        })
    }
}
