//! In-memory storage implementation.

use super::{BoxFuture, LayoutStorage, StorageError, StorageResult};
use crate::schema::PersistedDashboard;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, PersistedDashboard>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent load fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent save fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The stored document for a user, bypassing the async interface.
    pub fn get(&self, user_id: &str) -> Option<PersistedDashboard> {
        self.documents.read().ok()?.get(user_id).cloned()
    }

    /// Seed a user's document, bypassing the async interface.
    pub fn insert(&self, user_id: &str, document: PersistedDashboard) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        docs.insert(user_id.to_string(), document);
        Ok(())
    }
}

impl LayoutStorage for MemoryStorage {
    fn load(&self, user_id: &str) -> BoxFuture<'_, StorageResult<Option<PersistedDashboard>>> {
        let user_id = user_id.to_string();
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Io(format!("Failed to read layout for {}", user_id)));
            }
            let docs = self.documents.read().map_err(|e| {
                StorageError::Other(format!("Lock error: {}", e))
            })?;
            Ok(docs.get(&user_id).cloned())
        })
    }

    fn save(&self, user_id: &str, document: &PersistedDashboard) -> BoxFuture<'_, StorageResult<()>> {
        let user_id = user_id.to_string();
        let document = document.clone();
        Box::pin(async move {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Io(format!("Failed to write layout for {}", user_id)));
            }
            let mut docs = self.documents.write().map_err(|e| {
                StorageError::Other(format!("Lock error: {}", e))
            })?;
            docs.insert(user_id, document);
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::layout::ResponsiveLayouts;
    use crate::storage::block_on;

    fn document() -> PersistedDashboard {
        PersistedDashboard::new(defaults::initial_widgets(), ResponsiveLayouts::new())
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = document();

        block_on(storage.save("user-1", &doc)).unwrap();
        let loaded = block_on(storage.load("user-1")).unwrap();

        assert_eq!(loaded, Some(doc));
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn test_missing_user_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(block_on(storage.load("nobody")).unwrap(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let storage = MemoryStorage::new();
        block_on(storage.save("user-1", &document())).unwrap();

        let empty = PersistedDashboard::new(Vec::new(), ResponsiveLayouts::new());
        block_on(storage.save("user-1", &empty)).unwrap();

        assert_eq!(storage.get("user-1"), Some(empty));
    }

    #[test]
    fn test_injected_failures() {
        let storage = MemoryStorage::new();
        storage.insert("user-1", document()).unwrap();

        storage.set_fail_reads(true);
        assert!(matches!(block_on(storage.load("user-1")), Err(StorageError::Io(_))));

        storage.set_fail_writes(true);
        assert!(matches!(block_on(storage.save("user-1", &document())), Err(StorageError::Io(_))));
        assert_eq!(storage.save_count(), 0);

        storage.set_fail_reads(false);
        assert!(block_on(storage.load("user-1")).unwrap().is_some());
    }
}
