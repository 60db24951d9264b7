//! On-disk vector store: one `<collection>.json` file per collection
//!
//! Files are loaded when the store is opened and rewritten after every mutation.
//! There is no write-ahead log; a crash mid-write leaves the previous file intact
//! because writes go through a temporary file and a rename.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use ragassist_core::error::{RagError, Result};

use crate::collection::{validate_name, StoredCollection};
use crate::ports::{Collection, VectorStore};

pub struct PersistentVectorStore {
    dir: PathBuf,
    collections: RwLock<HashMap<String, Arc<StoredCollection>>>,
}

impl PersistentVectorStore {
    /// Open (creating if needed) the store directory and load every collection in it
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut collections = HashMap::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let collection = StoredCollection::load(path)?;
            collections.insert(collection.name().to_string(), Arc::new(collection));
        }

        tracing::info!("Opened vector store at {} ({} collections)", dir.display(), collections.len());
        Ok(Self { dir, collections: RwLock::new(collections) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_file(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

fn poisoned() -> RagError {
    RagError::Store("persistent store lock poisoned".to_string())
}

impl VectorStore for PersistentVectorStore {
    fn get_collection(&self, name: &str) -> Result<Option<Arc<dyn Collection>>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(name).map(|c| c.clone() as Arc<dyn Collection>))
    }

    fn get_or_create_collection(&self, name: &str) -> Result<Arc<dyn Collection>> {
        validate_name(name)?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        if let Some(existing) = collections.get(name) {
            return Ok(existing.clone());
        }

        let collection =
            Arc::new(StoredCollection::create_file_backed(name, self.collection_file(name))?);
        tracing::info!("Created collection '{}'", name);
        collections.insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    fn delete_collection(&self, name: &str) -> Result<bool> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let Some(collection) = collections.remove(name) else {
            return Ok(false);
        };

        if let Some(file) = collection.file() {
            if file.exists() {
                fs::remove_file(file)?;
            }
        }
        tracing::info!("Deleted collection '{}'", name);
        Ok(true)
    }

    fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragassist_core::models::{DocumentRecord, Include};
    use tempfile::TempDir;

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = PersistentVectorStore::open(dir.path()).unwrap();
            let collection = store.get_or_create_collection("publications").unwrap();
            collection
                .add(vec![
                    DocumentRecord::new("a", "alpha", vec![1.0, 0.0]).with_metadata("source", "a.md"),
                    DocumentRecord::new("b", "beta", vec![0.0, 1.0]),
                ])
                .unwrap();
        }

        let reopened = PersistentVectorStore::open(dir.path()).unwrap();
        let collection = reopened.get_collection("publications").unwrap().unwrap();

        assert_eq!(collection.count().unwrap(), 2);
        assert_eq!(collection.dimensions().unwrap(), Some(2));

        let result = collection
            .query(&[vec![0.0, 1.0]], 1, &[Include::Documents, Include::Metadatas])
            .unwrap();
        assert_eq!(result.ids[0], vec!["b"]);

        // Ids stay unique after reload
        assert!(collection.add(vec![DocumentRecord::new("a", "again", vec![1.0, 0.0])]).is_err());
        assert_eq!(collection.get(&["a"]).unwrap()[0].metadata["source"], "a.md");
    }

    #[test]
    fn test_deleted_records_stay_deleted_after_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = PersistentVectorStore::open(dir.path()).unwrap();
            let collection = store.get_or_create_collection("publications").unwrap();
            collection
                .add(vec![
                    DocumentRecord::new("a_0", "alpha", vec![1.0, 0.0]).with_metadata("source", "a.md"),
                    DocumentRecord::new("b_0", "beta", vec![0.0, 1.0]).with_metadata("source", "b.md"),
                ])
                .unwrap();
            assert_eq!(collection.delete_where("source", &[serde_json::Value::from("a.md")]).unwrap(), 1);
        }

        let reopened = PersistentVectorStore::open(dir.path()).unwrap();
        let collection = reopened.get_collection("publications").unwrap().unwrap();
        assert_eq!(collection.count().unwrap(), 1);
        assert_eq!(collection.get(&["b_0"]).unwrap()[0].text, "beta");
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = PersistentVectorStore::open(dir.path()).unwrap();
        store.get_or_create_collection("temp").unwrap();
        assert!(dir.path().join("temp.json").exists());

        assert!(store.delete_collection("temp").unwrap());
        assert!(!dir.path().join("temp.json").exists());
        assert!(store.get_collection("temp").unwrap().is_none());
    }

    #[test]
    fn test_corrupted_file_is_store_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        let err = PersistentVectorStore::open(dir.path()).err().unwrap();
        assert!(matches!(err, RagError::Store(_)));
    }

    #[test]
    fn test_failed_mutation_leaves_file_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = PersistentVectorStore::open(dir.path()).unwrap();
        let collection = store.get_or_create_collection("docs").unwrap();
        collection.add(vec![DocumentRecord::new("a", "alpha", vec![1.0])]).unwrap();

        assert!(collection.add(vec![DocumentRecord::new("b", "beta", vec![1.0, 2.0])]).is_err());

        let reopened = PersistentVectorStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_collection("docs").unwrap().unwrap().count().unwrap(), 1);
    }
}
