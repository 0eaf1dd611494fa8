//! Pantry inventory.
//!
//! Items are only ever removed through a confirmed [`PendingRemoval`];
//! quantity adjustments never take an item below [`MIN_QUANTITY`].

use chrono::{NaiveDate, Utc};

use crate::collection::{Collection, PendingRemoval};
use crate::error::ChefError;
use crate::models::{
    parse_expiration_date, Category, ExpirationStatus, ItemDraft, PantryItem, MIN_QUANTITY,
};
use crate::store::{KeyValueStore, StorageError, StoreKey};

const ITEM_KIND: &str = "Pantry item";

/// Items matching `search` (case-insensitive, on the name) and, when given,
/// belonging to `category`.
pub fn filter_items<'a>(
    items: &'a [PantryItem],
    search: &str,
    category: Option<Category>,
) -> Vec<&'a PantryItem> {
    items
        .iter()
        .filter(|item| item.matches_search(search))
        .filter(|item| category.map_or(true, |c| item.category == c))
        .collect()
}

/// The pantry collection, stored under `pantryItems`.
#[derive(Debug)]
pub struct PantryInventory<S> {
    items: Collection<PantryItem, S>,
}

impl<S: KeyValueStore> PantryInventory<S> {
    pub fn load(store: S) -> Result<Self, StorageError> {
        Ok(Self {
            items: Collection::load(store, StoreKey::PantryItems)?,
        })
    }

    pub fn items(&self) -> &[PantryItem] {
        self.items.items()
    }

    pub fn get(&self, id: &str) -> Option<&PantryItem> {
        self.items.get(id)
    }

    /// Validates the draft, then appends and persists a new item.
    ///
    /// A draft with missing fields changes nothing. A quantity below
    /// [`MIN_QUANTITY`] is reported as a missing quantity.
    pub fn add_item(&mut self, mut draft: ItemDraft) -> Result<PantryItem, ChefError> {
        if draft.quantity.is_some_and(|q| q < MIN_QUANTITY) {
            draft.quantity = None;
        }
        let valid = draft.validate()?;
        let now = Utc::now();
        let item = PantryItem::from_draft(self.items.next_id(now), valid, now);

        self.items.push(item.clone());
        self.items.persist()?;

        tracing::info!(id = %item.id, name = %item.name, "Added pantry item");
        Ok(item)
    }

    /// Adds `delta` to the item's quantity, flooring at [`MIN_QUANTITY`].
    pub fn adjust_quantity(&mut self, id: &str, delta: f64) -> Result<PantryItem, ChefError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ChefError::not_found(ITEM_KIND, id))?;
        item.adjust_quantity(delta, Utc::now());
        let updated = item.clone();

        if updated.quantity == MIN_QUANTITY && delta < 0.0 {
            tracing::debug!(id, "Quantity held at minimum");
        }

        self.items.persist()?;
        Ok(updated)
    }

    /// Starts deleting an item. Nothing is removed until the returned
    /// removal is confirmed.
    pub fn request_delete(
        &mut self,
        id: &str,
    ) -> Result<PendingRemoval<'_, PantryItem, S>, ChefError> {
        self.items.request_removal_of(ITEM_KIND, id)
    }

    pub fn filter(&self, search: &str, category: Option<Category>) -> Vec<&PantryItem> {
        filter_items(self.items.items(), search, category)
    }

    /// Items that are expired or expire within `days` of `today`, soonest
    /// first. Items without a date, or with an unreadable one, are left out.
    pub fn expiring_within(&self, today: NaiveDate, days: i64) -> Vec<(&PantryItem, ExpirationStatus)> {
        let mut expiring: Vec<(NaiveDate, &PantryItem, ExpirationStatus)> = self
            .items
            .items()
            .iter()
            .filter_map(|item| {
                let date = item.expiration_date.as_deref().and_then(parse_expiration_date)?;
                let status = item.expiration_status(today);
                let within = match status {
                    ExpirationStatus::Expired { .. } => true,
                    ExpirationStatus::Warning { days_left } | ExpirationStatus::Good { days_left } => {
                        days_left <= days
                    }
                    ExpirationStatus::NoDate | ExpirationStatus::Invalid => false,
                };
                within.then_some((date, item, status))
            })
            .collect();

        expiring.sort_by_key(|(date, _, _)| *date);
        expiring
            .into_iter()
            .map(|(_, item, status)| (item, status))
            .collect()
    }

    /// Retries writing the current in-memory state.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.items.persist()
    }
}
