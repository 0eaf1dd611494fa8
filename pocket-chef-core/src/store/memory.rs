//! In-memory key-value store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{KeyValueStore, StorageError};

/// A store that keeps blobs in memory.
///
/// Clones share the same entries, so a test can hand one clone to a service
/// and inspect the other. Writes can be made to fail with
/// [`MemoryStore::fail_writes`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Returns the raw blob under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores a raw blob, bypassing write failures.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable(format!(
                "write to '{}' rejected",
                key
            )));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
