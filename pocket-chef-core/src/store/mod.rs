//! Key-value persistence for the Pocket Chef collections.
//!
//! Every collection is stored whole, as a JSON blob under a fixed key.
//! Saving a collection overwrites the previous blob; there is no
//! incremental diffing and no concurrency check (last writer wins).
//!
//! # Keys
//!
//! - `favorites`: JSON array of recipe ids
//! - `pantryItems`: JSON array of pantry items
//! - `shoppingList`: JSON array of shopping list items
//! - `mealPlans`: JSON array of weekly meal plans
//! - `recipes`: JSON array of recipes

mod file;
mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A store of named string blobs that survives restarts.
pub trait KeyValueStore {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The keys used by the model services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Favorites,
    PantryItems,
    ShoppingList,
    MealPlans,
    Recipes,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Favorites => "favorites",
            StoreKey::PantryItems => "pantryItems",
            StoreKey::ShoppingList => "shoppingList",
            StoreKey::MealPlans => "mealPlans",
            StoreKey::Recipes => "recipes",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loads and deserializes the value stored under `key`.
///
/// Absent keys yield `Ok(None)`. Content that does not parse is reported as
/// [`StorageError::Corrupted`] and left untouched on the medium.
pub fn load_json<T, S>(store: &S, key: StoreKey) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.load(key.as_str())? {
        Some(blob) => serde_json::from_str(&blob)
            .map(Some)
            .map_err(|e| StorageError::Corrupted(key.as_str().to_string(), e)),
        None => Ok(None),
    }
}

/// Serializes `value` and stores it under `key`, replacing the old value.
pub fn save_json<T, S>(store: &S, key: StoreKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let blob = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialize(key.as_str().to_string(), e))?;
    store.save(key.as_str(), &blob)
}

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    #[error("I/O error for {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    /// The stored value for a key could not be parsed.
    #[error("Stored data for '{0}' is corrupted: {1}")]
    Corrupted(String, #[source] serde_json::Error),

    /// A value could not be serialized before writing.
    #[error("Failed to serialize '{0}': {1}")]
    Serialize(String, #[source] serde_json::Error),

    /// The storage medium refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
