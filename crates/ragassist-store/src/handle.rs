//! Lazily-opened, process-wide vector store handle
//!
//! The handle is created once at startup and passed explicitly to whatever needs the
//! store. The store itself is only opened on the first `get()`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use ragassist_core::error::{RagError, Result};

use crate::memory::MemoryVectorStore;
use crate::persistent::PersistentVectorStore;
use crate::ports::VectorStore;

type Opener = Box<dyn Fn() -> Result<Arc<dyn VectorStore>> + Send + Sync>;

pub struct StoreHandle {
    slot: Mutex<Option<Arc<dyn VectorStore>>>,
    opener: Opener,
}

impl StoreHandle {
    pub fn new(opener: impl Fn() -> Result<Arc<dyn VectorStore>> + Send + Sync + 'static) -> Self {
        Self { slot: Mutex::new(None), opener: Box::new(opener) }
    }

    /// Handle over the on-disk store rooted at `dir`
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(move || Ok(Arc::new(PersistentVectorStore::open(&dir)?) as Arc<dyn VectorStore>))
    }

    /// Handle over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryVectorStore::new()))
    }

    /// Handle that always yields `store`, even after a shutdown
    pub fn from_store(store: Arc<dyn VectorStore>) -> Self {
        Self::new(move || Ok(store.clone()))
    }

    /// Open store, opening it on first use
    pub fn get(&self) -> Result<Arc<dyn VectorStore>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| RagError::Store("store handle lock poisoned".to_string()))?;

        if let Some(store) = slot.as_ref() {
            return Ok(store.clone());
        }

        tracing::debug!("Opening vector store");
        let store = (self.opener)()?;
        *slot = Some(store.clone());
        Ok(store)
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Drop the open store; the next `get()` opens it again
    pub fn shutdown(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.take().is_some() {
                tracing::debug!("Vector store closed");
            }
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle").field("open", &self.is_open()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[test]
    fn test_opens_lazily_once() {
        let opened = Arc::new(AtomicUsize::new(0));
        let counter = opened.clone();
        let handle = StoreHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MemoryVectorStore::new()) as Arc<dyn VectorStore>)
        });

        assert!(!handle.is_open());
        assert_eq!(opened.load(Ordering::SeqCst), 0);

        let first = handle.get().unwrap();
        let second = handle.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert!(handle.is_open());
    }

    #[test]
    fn test_shutdown_reopens() {
        let opened = Arc::new(AtomicUsize::new(0));
        let counter = opened.clone();
        let handle = StoreHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MemoryVectorStore::new()) as Arc<dyn VectorStore>)
        });

        handle.get().unwrap();
        handle.shutdown();
        assert!(!handle.is_open());

        handle.get().unwrap();
        assert_eq!(opened.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_open_failure_is_not_cached() {
        let handle = StoreHandle::new(|| Err(RagError::Store("unavailable".into())));
        assert!(handle.get().is_err());
        assert!(!handle.is_open());
    }

    #[test]
    fn test_persistent_handle_creates_directory() {
        let dir = TempDir::new().unwrap();
        let db_dir = dir.path().join("vector_db");
        let handle = StoreHandle::persistent(&db_dir);

        assert!(!db_dir.exists());
        let store = handle.get().unwrap();
        store.get_or_create_collection("publications").unwrap();
        assert!(db_dir.join("publications.json").exists());
    }
}
