//! Pocket Chef Core Library
//!
//! Pantry, shopping list, favorites, meal plan and recipe models, persisted
//! as whole JSON collections in a key-value store.

pub mod catalog;
pub mod collection;
pub mod cooking;
pub mod error;
pub mod favorites;
pub mod lookup;
pub mod meal_planner;
pub mod models;
pub mod pantry;
pub mod shopping;
pub mod store;

pub use catalog::{sample_recipes, RecipeCatalog, RecipeFilter};
pub use collection::{Collection, Identified, PendingRemoval};
pub use cooking::{format_timer, CookingSession};
pub use error::{ChefError, ValidationError};
pub use favorites::Favorites;
pub use lookup::{BarcodeScanner, LookupClient, LookupError, ReaderScanner, ScanError};
pub use meal_planner::MealPlanner;
pub use models::{
    Category, DailyMeal, Difficulty, ExpirationStatus, ItemDraft, ItemSource, MealPlan, MealSlot,
    MealType, PantryItem, Product, Recipe, RecipeIngredient, ShoppingListItem, WeekDirection,
};
pub use pantry::{filter_items, PantryInventory};
pub use shopping::{group_by_category, CategoryGroup, MergeReport, ShoppingList};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError, StoreKey};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
