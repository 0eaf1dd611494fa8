//! Shopping list.
//!
//! Checked items stay on the list until they are deleted one by one or
//! cleared in bulk; both removals go through a confirmed
//! [`PendingRemoval`].

use chrono::Utc;
use serde::Serialize;

use crate::catalog::RecipeCatalog;
use crate::collection::{Collection, PendingRemoval};
use crate::error::ChefError;
use crate::models::{Category, ItemDraft, ItemSource, MealPlan, Recipe, ShoppingListItem, ValidDraft};
use crate::store::{KeyValueStore, StorageError, StoreKey};

const ITEM_KIND: &str = "Shopping list item";

/// Category used for recipe ingredients that do not declare one.
pub const DEFAULT_INGREDIENT_CATEGORY: Category = Category::PantryStaples;

/// The items of one category, in list order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub items: Vec<&'a ShoppingListItem>,
}

/// Filters `items` by name and groups them by category.
///
/// Groups follow the declared category order and empty groups are left
/// out. Items keep their list order inside a group.
pub fn group_by_category<'a>(items: &'a [ShoppingListItem], search: &str) -> Vec<CategoryGroup<'a>> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let matching: Vec<&ShoppingListItem> = items
                .iter()
                .filter(|item| item.category == category && item.matches_search(search))
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category,
                    items: matching,
                })
            }
        })
        .collect()
}

/// What a bulk add from a recipe or meal plan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// New items appended to the list.
    pub added: usize,
    /// Existing unchecked items whose quantity was increased.
    pub merged: usize,
    /// Recipe ids referenced by the plan that the catalog does not know.
    pub missing_recipes: Vec<String>,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.merged == 0
    }
}

/// The shopping list collection, stored under `shoppingList`.
#[derive(Debug)]
pub struct ShoppingList<S> {
    items: Collection<ShoppingListItem, S>,
}

impl<S: KeyValueStore> ShoppingList<S> {
    pub fn load(store: S) -> Result<Self, StorageError> {
        Ok(Self {
            items: Collection::load(store, StoreKey::ShoppingList)?,
        })
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        self.items.items()
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.get(id)
    }

    pub fn checked_count(&self) -> usize {
        self.items().iter().filter(|item| item.checked).count()
    }

    /// Validates the draft, then appends and persists a manual item.
    pub fn add_item(&mut self, draft: ItemDraft) -> Result<ShoppingListItem, ChefError> {
        self.add_with_source(draft, ItemSource::Manual)
    }

    pub fn add_with_source(
        &mut self,
        draft: ItemDraft,
        source: ItemSource,
    ) -> Result<ShoppingListItem, ChefError> {
        let valid = draft.validate()?;
        let item = self.append(valid, source);
        self.items.persist()?;

        tracing::info!(id = %item.id, name = %item.name, %source, "Added shopping list item");
        Ok(item)
    }

    /// Flips the checked state. Returns the new state.
    pub fn toggle_checked(&mut self, id: &str) -> Result<bool, ChefError> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| ChefError::not_found(ITEM_KIND, id))?;
        item.checked = !item.checked;
        let checked = item.checked;

        self.items.persist()?;
        Ok(checked)
    }

    /// Starts deleting one item.
    pub fn request_delete(
        &mut self,
        id: &str,
    ) -> Result<PendingRemoval<'_, ShoppingListItem, S>, ChefError> {
        self.items.request_removal_of(ITEM_KIND, id)
    }

    /// Starts removing every checked item.
    ///
    /// The removal is empty when nothing is checked.
    pub fn request_clear_checked(&mut self) -> PendingRemoval<'_, ShoppingListItem, S> {
        let ids = self
            .items()
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.id.clone())
            .collect();
        self.items.request_removal(ids)
    }

    pub fn grouped(&self, search: &str) -> Vec<CategoryGroup<'_>> {
        group_by_category(self.items(), search)
    }

    /// Adds every ingredient of `recipe`, multiplied by `servings`.
    pub fn add_recipe_ingredients(
        &mut self,
        recipe: &Recipe,
        servings: u32,
    ) -> Result<MergeReport, ChefError> {
        let mut report = MergeReport::default();
        self.merge_recipe(recipe, servings, ItemSource::Recipe, &mut report);
        if !report.is_empty() {
            self.items.persist()?;
        }
        tracing::info!(
            recipe = %recipe.name,
            added = report.added,
            merged = report.merged,
            "Added recipe ingredients to shopping list"
        );
        Ok(report)
    }

    /// Adds the ingredients of every recipe planned for the week.
    ///
    /// Slots whose recipe is not in the catalog are skipped and listed in
    /// the report.
    pub fn add_from_meal_plan<C: KeyValueStore>(
        &mut self,
        plan: &MealPlan,
        catalog: &RecipeCatalog<C>,
    ) -> Result<MergeReport, ChefError> {
        let mut report = MergeReport::default();

        for (date, meal_type, slot) in plan.assigned_slots() {
            match catalog.get(&slot.recipe_id) {
                Some(recipe) => {
                    self.merge_recipe(recipe, slot.servings, ItemSource::MealPlan, &mut report)
                }
                None => {
                    tracing::warn!(
                        recipe_id = %slot.recipe_id,
                        %date,
                        %meal_type,
                        "Planned recipe not found, skipping"
                    );
                    if !report.missing_recipes.contains(&slot.recipe_id) {
                        report.missing_recipes.push(slot.recipe_id.clone());
                    }
                }
            }
        }

        if !report.is_empty() {
            self.items.persist()?;
        }
        Ok(report)
    }

    /// Retries writing the current in-memory state.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.items.persist()
    }

    fn append(&mut self, valid: ValidDraft, source: ItemSource) -> ShoppingListItem {
        let now = Utc::now();
        let item = ShoppingListItem::from_draft(self.items.next_id(now), valid, source, now);
        self.items.push(item.clone());
        item
    }

    fn merge_recipe(
        &mut self,
        recipe: &Recipe,
        servings: u32,
        source: ItemSource,
        report: &mut MergeReport,
    ) {
        let factor = f64::from(servings.max(1));

        for ingredient in &recipe.ingredients {
            let quantity = ingredient.quantity * factor;
            if !(quantity.is_finite() && quantity > 0.0) {
                tracing::debug!(
                    ingredient = ingredient.display_name(),
                    "Skipping ingredient without a usable quantity"
                );
                continue;
            }
            let name = ingredient.display_name();

            let existing = self
                .items
                .items()
                .iter()
                .find(|item| !item.checked && item.same_product(name, &ingredient.unit))
                .map(|item| item.id.clone());

            match existing.and_then(|id| self.items.get_mut(&id)) {
                Some(item) => {
                    item.quantity += quantity;
                    report.merged += 1;
                }
                None => {
                    let valid = ValidDraft {
                        name: name.to_string(),
                        quantity,
                        unit: ingredient.unit.clone(),
                        category: ingredient.category.unwrap_or(DEFAULT_INGREDIENT_CATEGORY),
                        expiration_date: None,
                    };
                    self.append(valid, source);
                    report.added += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, MealSlot, MealType, RecipeIngredient};
    use crate::store::{load_json, MemoryStore};
    use chrono::NaiveDate;

    fn draft(name: &str, category: Category) -> ItemDraft {
        ItemDraft::new()
            .with_name(name)
            .with_quantity(1.0)
            .with_unit("units")
            .with_category(category)
    }

    fn list_with(names: &[(&str, Category)]) -> (MemoryStore, ShoppingList<MemoryStore>) {
        let store = MemoryStore::new();
        let mut list = ShoppingList::load(store.clone()).unwrap();
        for (name, category) in names {
            list.add_item(draft(name, *category)).unwrap();
        }
        (store, list)
    }

    fn stored(store: &MemoryStore) -> Vec<ShoppingListItem> {
        load_json(store, StoreKey::ShoppingList).unwrap().unwrap_or_default()
    }

    fn carbonara() -> Recipe {
        Recipe::new("1", "Pasta Carbonara", 30, Difficulty::Medium).with_ingredients(vec![
            RecipeIngredient::new("1", "Spaghetti", 400.0, "g"),
            RecipeIngredient::new("2", "Eggs", 4.0, "units").with_category(Category::Dairy),
        ])
    }

    #[test]
    fn test_add_item_is_manual_and_unchecked() {
        let (store, list) = list_with(&[("Bread", Category::PantryStaples)]);
        let item = &list.items()[0];
        assert_eq!(item.source, ItemSource::Manual);
        assert!(!item.checked);
        assert_eq!(stored(&store).len(), 1);
    }

    #[test]
    fn test_add_item_validation() {
        let (store, mut list) = list_with(&[]);
        let result = list.add_item(ItemDraft::new().with_quantity(2.0));
        match result {
            Err(ChefError::Validation(e)) => assert_eq!(e.missing, vec!["name", "unit", "category"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.raw("shoppingList").is_none());
    }

    #[test]
    fn test_toggle_checked() {
        let (store, mut list) = list_with(&[("Bread", Category::PantryStaples)]);
        let id = list.items()[0].id.clone();

        assert!(list.toggle_checked(&id).unwrap());
        assert!(stored(&store)[0].checked);
        assert!(!list.toggle_checked(&id).unwrap());
        assert!(!stored(&store)[0].checked);

        assert!(matches!(
            list.toggle_checked("nope"),
            Err(ChefError::NotFound { .. })
        ));
    }

    #[test]
    fn test_clear_checked_keeps_unchecked_in_order() {
        let (store, mut list) = list_with(&[
            ("A", Category::Produce),
            ("B", Category::Dairy),
            ("C", Category::Meat),
            ("D", Category::Beverages),
            ("E", Category::Produce),
        ]);
        let ids: Vec<String> = list.items().iter().map(|i| i.id.clone()).collect();
        list.toggle_checked(&ids[1]).unwrap();
        list.toggle_checked(&ids[3]).unwrap();

        let pending = list.request_clear_checked();
        assert_eq!(pending.len(), 2);
        let removed = pending.confirm().unwrap();
        assert_eq!(removed.len(), 2);

        let names: Vec<_> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "E"]);
        assert_eq!(stored(&store).len(), 3);
    }

    #[test]
    fn test_clear_checked_cancelled() {
        let (_, mut list) = list_with(&[("A", Category::Produce)]);
        let id = list.items()[0].id.clone();
        list.toggle_checked(&id).unwrap();

        list.request_clear_checked().cancel();
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.checked_count(), 1);
    }

    #[test]
    fn test_clear_checked_with_nothing_checked() {
        let (_, mut list) = list_with(&[("A", Category::Produce)]);
        assert!(list.request_clear_checked().is_empty());
    }

    #[test]
    fn test_delete_single_item() {
        let (_, mut list) = list_with(&[("A", Category::Produce), ("B", Category::Dairy)]);
        let id = list.items()[0].id.clone();

        list.request_delete(&id).unwrap().confirm().unwrap();
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "B");
    }

    #[test]
    fn test_group_by_category_only_matching_bucket() {
        let (_, list) = list_with(&[
            ("Apples", Category::Produce),
            ("Milk", Category::Dairy),
            ("Pears", Category::Produce),
        ]);

        let groups = list.grouped("app");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, Category::Produce);
        assert_eq!(groups[0].items.len(), 1);
        assert_eq!(groups[0].items[0].name, "Apples");
    }

    #[test]
    fn test_group_by_category_declared_order() {
        let (_, list) = list_with(&[
            ("Water", Category::Beverages),
            ("Apples", Category::Produce),
            ("Milk", Category::Dairy),
            ("Pears", Category::Produce),
        ]);

        let groups = group_by_category(list.items(), "");
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![Category::Produce, Category::Dairy, Category::Beverages]
        );
        let produce: Vec<_> = groups[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(produce, vec!["Apples", "Pears"]);
    }

    #[test]
    fn test_add_recipe_ingredients() {
        let (store, mut list) = list_with(&[]);

        let report = list.add_recipe_ingredients(&carbonara(), 1).unwrap();

        assert_eq!(report.added, 2);
        let items = stored(&store);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.source == ItemSource::Recipe));
        assert_eq!(items[0].category, DEFAULT_INGREDIENT_CATEGORY);
        assert_eq!(items[1].category, Category::Dairy);
    }

    #[test]
    fn test_add_recipe_ingredients_merges_unchecked() {
        let (_, mut list) = list_with(&[]);
        list.add_item(
            ItemDraft::new()
                .with_name("eggs")
                .with_quantity(2.0)
                .with_unit("units")
                .with_category(Category::Dairy),
        )
        .unwrap();

        let report = list.add_recipe_ingredients(&carbonara(), 2).unwrap();

        assert_eq!(report.merged, 1);
        assert_eq!(report.added, 1);
        let eggs = list.items().iter().find(|i| i.name == "eggs").unwrap();
        assert_eq!(eggs.quantity, 10.0);
        let pasta = list.items().iter().find(|i| i.name == "Spaghetti").unwrap();
        assert_eq!(pasta.quantity, 800.0);
    }

    #[test]
    fn test_add_recipe_ingredients_ignores_checked_duplicate() {
        let (_, mut list) = list_with(&[]);
        let eggs = list
            .add_item(
                ItemDraft::new()
                    .with_name("Eggs")
                    .with_quantity(2.0)
                    .with_unit("units")
                    .with_category(Category::Dairy),
            )
            .unwrap();
        list.toggle_checked(&eggs.id).unwrap();

        let report = list.add_recipe_ingredients(&carbonara(), 1).unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(list.items().len(), 3);
    }

    #[test]
    fn test_add_from_meal_plan() {
        let catalog_store = MemoryStore::new();
        let catalog = RecipeCatalog::load(catalog_store).unwrap();
        let (_, mut list) = list_with(&[]);

        let day = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let mut plan = MealPlan::for_week(day, "user1");
        let recipe = catalog.get("1").unwrap().clone();
        plan.assign(day, MealType::Lunch, MealSlot::new(&recipe.id, &recipe.name))
            .unwrap();
        plan.assign(
            day,
            MealType::Dinner,
            MealSlot::new(&recipe.id, &recipe.name).with_servings(2),
        )
        .unwrap();
        plan.assign(day, MealType::Breakfast, MealSlot::new("404", "Ghost"))
            .unwrap();

        let report = list.add_from_meal_plan(&plan, &catalog).unwrap();

        assert_eq!(report.missing_recipes, vec!["404".to_string()]);
        assert_eq!(report.added, recipe.ingredients.len());
        assert_eq!(report.merged, recipe.ingredients.len());
        assert!(list.items().iter().all(|i| i.source == ItemSource::MealPlan));
        let first = &recipe.ingredients[0];
        let item = list
            .items()
            .iter()
            .find(|i| i.name == first.display_name())
            .unwrap();
        assert_eq!(item.quantity, first.quantity * 3.0);
    }

    #[test]
    fn test_add_from_empty_plan_does_not_write() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        let (store, mut list) = list_with(&[]);
        let plan = MealPlan::for_week(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(), "user1");

        let report = list.add_from_meal_plan(&plan, &catalog).unwrap();
        assert!(report.is_empty());
        assert!(store.raw("shoppingList").is_none());
    }
}
