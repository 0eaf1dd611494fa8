//! A whole-collection view over one store key.
//!
//! The pantry and the shopping list share this shape: load the full array,
//! mutate it in memory, write the full array back. Mutations are applied to
//! memory first; if the write then fails the caller gets the
//! [`StorageError`] and the in-memory state stays as it is, so the change
//! can be retried with [`Collection::persist`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ChefError;
use crate::models::{PantryItem, ShoppingListItem};
use crate::store::{load_json, save_json, KeyValueStore, StorageError, StoreKey};

/// Items that carry a string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for PantryItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ShoppingListItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An ordered collection persisted as one JSON array.
#[derive(Debug)]
pub struct Collection<T, S> {
    store: S,
    key: StoreKey,
    items: Vec<T>,
}

impl<T, S> Collection<T, S>
where
    T: Identified + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Loads the collection stored under `key`; absent means empty.
    pub fn load(store: S, key: StoreKey) -> Result<Self, StorageError> {
        let items: Vec<T> = load_json(&store, key)?.unwrap_or_default();
        tracing::debug!(key = %key, count = items.len(), "Loaded collection");
        Ok(Self { store, key, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn key(&self) -> StoreKey {
        self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Writes the whole collection back to the store.
    pub fn persist(&self) -> Result<(), StorageError> {
        save_json(&self.store, self.key, &self.items)?;
        tracing::debug!(key = %self.key, count = self.items.len(), "Saved collection");
        Ok(())
    }

    /// Generates an id from the creation time in milliseconds.
    ///
    /// Two items created in the same millisecond get consecutive ids.
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Starts a removal of the given items, to be confirmed or cancelled.
    pub fn request_removal(&mut self, ids: Vec<String>) -> PendingRemoval<'_, T, S> {
        PendingRemoval {
            collection: self,
            ids,
        }
    }

    /// Starts a removal of a single item.
    ///
    /// Fails with `NotFound` if the id is unknown.
    pub fn request_removal_of(
        &mut self,
        kind: &'static str,
        id: &str,
    ) -> Result<PendingRemoval<'_, T, S>, ChefError> {
        if self.get(id).is_none() {
            return Err(ChefError::not_found(kind, id));
        }
        Ok(self.request_removal(vec![id.to_string()]))
    }
}

/// A removal waiting for the user to confirm it.
///
/// Nothing changes until [`PendingRemoval::confirm`] is called; dropping
/// the value or calling [`PendingRemoval::cancel`] leaves the collection
/// untouched.
pub struct PendingRemoval<'a, T, S> {
    collection: &'a mut Collection<T, S>,
    ids: Vec<String>,
}

impl<'a, T, S> PendingRemoval<'a, T, S>
where
    T: Identified + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// The items that would be removed, in collection order.
    pub fn targets(&self) -> Vec<&T> {
        self.collection
            .items
            .iter()
            .filter(|item| self.ids.iter().any(|id| id == item.id()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.targets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the targets and persists the collection.
    ///
    /// Returns the removed items. The remaining items keep their order.
    pub fn confirm(self) -> Result<Vec<T>, ChefError> {
        let ids = self.ids;
        let collection = self.collection;
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut collection.items)
            .into_iter()
            .partition(|item| ids.iter().any(|id| id == item.id()));
        collection.items = kept;

        if removed.is_empty() {
            return Ok(removed);
        }
        collection.persist()?;
        Ok(removed)
    }

    pub fn cancel(self) {}
}
