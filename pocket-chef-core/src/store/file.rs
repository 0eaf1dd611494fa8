//! File-backed key-value store.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// File extension for stored blobs.
const BLOB_EXTENSION: &str = "json";

/// Stores each key as `<key>.json` in the data directory.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so a failed write never leaves a truncated blob.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new store rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", key, BLOB_EXTENSION))
    }

    /// Checks if a blob exists on disk.
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(path, e)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;

        let path = self.path(key);
        let mut temp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| StorageError::Io(self.data_dir.clone(), e))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| StorageError::Io(path.clone(), e))?;
        temp.persist(&path)
            .map_err(|e| StorageError::Io(path.clone(), e.error))?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_store_path() {
        let (store, _temp) = test_store();
        assert!(store.path("pantryItems").ends_with("pantryItems.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (store, _temp) = test_store();
        assert!(store.load("favorites").unwrap().is_none());
        assert!(!store.exists("favorites"));
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(nested_dir.clone());

        store.save("favorites", "[]").unwrap();

        assert!(nested_dir.exists());
        assert!(store.exists("favorites"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _temp) = test_store();
        store.save("shoppingList", r#"[{"id":"1"}]"#).unwrap();

        let loaded = store.load("shoppingList").unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"[{"id":"1"}]"#));
    }

    #[test]
    fn test_overwrite_existing_blob() {
        let (store, _temp) = test_store();
        store.save("favorites", r#"["1"]"#).unwrap();
        store.save("favorites", r#"["2"]"#).unwrap();

        assert_eq!(store.load("favorites").unwrap().as_deref(), Some(r#"["2"]"#));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (store, temp) = test_store();
        store.save("favorites", "[]").unwrap();
        store.save("pantryItems", "[]").unwrap();

        let count = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let (store, temp) = test_store();
        // A directory where the blob should be cannot be read as a file
        fs::create_dir_all(temp.path().join("favorites.json")).unwrap();

        let err = store.load("favorites").unwrap_err();
        assert!(matches!(err, StorageError::Io(_, _)));
    }
}
