//! The set of favorite recipes.
//!
//! Unlike the pantry and the shopping list, the favorites set only changes
//! in memory after the store has accepted the new set. A failed toggle
//! leaves both the store and the in-memory set as they were.

use crate::error::ChefError;
use crate::store::{load_json, save_json, KeyValueStore, StoreKey};

/// Recipe ids marked as favorite, in the order they were added.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    ids: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Reads the set from the store. An absent key is an empty set.
    ///
    /// Duplicate ids in the stored array are dropped, keeping the first.
    pub fn load(store: S) -> Result<Self, ChefError> {
        let stored: Vec<String> = load_json(&store, StoreKey::Favorites)?.unwrap_or_default();

        let mut ids: Vec<String> = Vec::with_capacity(stored.len());
        for id in stored {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        tracing::debug!(count = ids.len(), "Loaded favorites");
        Ok(Self { store, ids })
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.ids.iter().any(|id| id == recipe_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds the id if absent, removes it if present.
    ///
    /// Returns whether the recipe is a favorite afterwards.
    pub fn toggle(&mut self, recipe_id: &str) -> Result<bool, ChefError> {
        let mut next = self.ids.clone();
        let now_favorite = match next.iter().position(|id| id == recipe_id) {
            Some(index) => {
                next.remove(index);
                false
            }
            None => {
                next.push(recipe_id.to_string());
                true
            }
        };

        if let Err(e) = save_json(&self.store, StoreKey::Favorites, &next) {
            tracing::warn!(recipe_id, error = %e, "Failed to save favorites");
            return Err(e.into());
        }

        self.ids = next;
        tracing::debug!(recipe_id, now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }
}
