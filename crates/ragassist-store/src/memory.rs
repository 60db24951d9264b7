//! In-memory vector store for tests and ephemeral runs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ragassist_core::error::{RagError, Result};

use crate::collection::{validate_name, StoredCollection};
use crate::ports::{Collection, VectorStore};

/// In-memory implementation of VectorStore
#[derive(Clone, Default)]
pub struct MemoryVectorStore {
    collections: Arc<RwLock<HashMap<String, Arc<StoredCollection>>>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RagError {
    RagError::Store("memory store lock poisoned".to_string())
}

impl VectorStore for MemoryVectorStore {
    fn get_collection(&self, name: &str) -> Result<Option<Arc<dyn Collection>>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(name).map(|c| c.clone() as Arc<dyn Collection>))
    }

    fn get_or_create_collection(&self, name: &str) -> Result<Arc<dyn Collection>> {
        validate_name(name)?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let collection = collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(StoredCollection::in_memory(name)));
        Ok(collection.clone())
    }

    fn delete_collection(&self, name: &str) -> Result<bool> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        Ok(collections.remove(name).is_some())
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

    #[test]
    fn test_missing_collection_is_none() {
        let store = MemoryVectorStore::new();
        assert!(store.get_collection("publications").unwrap().is_none());
    }

    #[test]
    fn test_get_or_create_reuses_collection() {
        let store = MemoryVectorStore::new();

        let first = store.get_or_create_collection("publications").unwrap();
        first.add(vec![DocumentRecord::new("a", "alpha", vec![1.0, 0.0])]).unwrap();

        let second = store.get_or_create_collection("publications").unwrap();
        assert_eq!(second.count().unwrap(), 1);

        let result = second.query(&[vec![1.0, 0.0]], 1, &[Include::Documents]).unwrap();
        assert_eq!(result.documents.unwrap()[0], vec!["alpha"]);
    }

    #[test]
    fn test_delete_and_list() {
        let store = MemoryVectorStore::new();
        store.get_or_create_collection("b").unwrap();
        store.get_or_create_collection("a").unwrap();

        assert_eq!(store.list_collections().unwrap(), vec!["a", "b"]);
        assert!(store.delete_collection("a").unwrap());
        assert!(!store.delete_collection("a").unwrap());
        assert_eq!(store.list_collections().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_invalid_collection_name() {
        let store = MemoryVectorStore::new();
        assert!(store.get_or_create_collection("a/b").is_err());
    }
}
