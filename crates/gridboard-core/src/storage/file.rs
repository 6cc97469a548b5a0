//! File-based storage implementation.

use super::{BoxFuture, LayoutStorage, StorageError, StorageResult};
use crate::schema::PersistedDashboard;
use std::fs;
use std::path::PathBuf;

/// File-based storage.
///
/// Stores each user's dashboard as a JSON file in a specified directory.
pub struct FileStorage {
    /// Base directory for layout files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/gridboard/layouts/`
    /// On Windows: `%LOCALAPPDATA%\gridboard\layouts\`
    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_path()?)
    }

    /// The directory [`default_location`](Self::default_location) uses.
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("gridboard").join("layouts"))
    }

    /// Get the file path for a user.
    fn layout_path(&self, user_id: &str) -> PathBuf {
        // Sanitize ID to be safe for filenames
        let safe_id: String = user_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl LayoutStorage for FileStorage {
    fn load(&self, user_id: &str) -> BoxFuture<'_, StorageResult<Option<PersistedDashboard>>> {
        let path = self.layout_path(user_id);

        Box::pin(async move {
            if !path.exists() {
                return Ok(None);
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            PersistedDashboard::from_json(&json).map(Some).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn save(&self, user_id: &str, document: &PersistedDashboard) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.layout_path(user_id);
        let json = match document.to_json() {
            Ok(j) => j,
            Err(e) => return Box::pin(async move {
                Err(StorageError::Serialization(e.to_string()))
            }),
        };

        Box::pin(async move {
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Breakpoint;
    use crate::layout::LayoutResolver;
    use crate::config::GridConfig;
    use crate::defaults;
    use crate::storage::block_on;
    use tempfile::tempdir;

    fn document() -> PersistedDashboard {
        let config = GridConfig::default();
        let layouts = LayoutResolver::new(&config).resolve(&defaults::canonical_layout());
        PersistedDashboard::new(defaults::initial_widgets(), layouts)
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let doc = document();

        block_on(storage.save("user-1", &doc)).unwrap();
        let loaded = block_on(storage.load("user-1")).unwrap().unwrap();

        assert_eq!(loaded, doc);
        assert_eq!(loaded.layouts.items(Breakpoint::Xxs).len(), 10);
    }

    #[test]
    fn test_file_storage_missing_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(block_on(storage.load("nobody")).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), &nested);
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("user-1.json"), "{ not json").unwrap();

        let result = block_on(storage.load("user-1"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let doc = document();

        // ID with special characters should be sanitized
        block_on(storage.save("auth0|user/42", &doc)).unwrap();
        assert!(dir.path().join("auth0_user_42.json").exists());

        // Should still be loadable with the same ID
        let loaded = block_on(storage.load("auth0|user/42")).unwrap();
        assert_eq!(loaded, Some(doc));
    }
}
