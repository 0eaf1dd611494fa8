//! The recipe catalog browsed from the home screen.
//!
//! Until something is stored under `recipes` the catalog serves the
//! built-in sample recipes. Fetched recipes are upserted and from then on
//! the stored collection (samples included) is what loads.

use std::fmt;
use std::str::FromStr;

use crate::error::ChefError;
use crate::models::{Category, Difficulty, Recipe, RecipeIngredient};
use crate::store::{load_json, save_json, KeyValueStore, StorageError, StoreKey};

/// Quick filters applied on top of the text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeFilter {
    #[default]
    All,
    /// Ready in 30 minutes or less.
    Quick,
    Easy,
    Favorites,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe, favorites: &[String]) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::Quick => recipe.is_quick(),
            RecipeFilter::Easy => recipe.difficulty == Difficulty::Easy,
            RecipeFilter::Favorites => favorites.iter().any(|id| *id == recipe.id),
        }
    }
}

impl fmt::Display for RecipeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeFilter::All => write!(f, "all"),
            RecipeFilter::Quick => write!(f, "quick"),
            RecipeFilter::Easy => write!(f, "easy"),
            RecipeFilter::Favorites => write!(f, "favorites"),
        }
    }
}

impl FromStr for RecipeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(RecipeFilter::All),
            "quick" => Ok(RecipeFilter::Quick),
            "easy" => Ok(RecipeFilter::Easy),
            "favorites" => Ok(RecipeFilter::Favorites),
            _ => Err(format!(
                "Invalid filter '{}'. Valid options: all, quick, easy, favorites",
                s
            )),
        }
    }
}

/// The recipes shipped with the application.
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("1", "Pasta Carbonara", 30, Difficulty::Medium)
            .with_description("Una deliciosa pasta carbonara tradicional italiana")
            .with_ingredients(vec![
                RecipeIngredient::new("1", "Espaguetis", 400.0, "g")
                    .with_category(Category::PantryStaples),
                RecipeIngredient::new("2", "Huevos", 4.0, "unidades")
                    .with_category(Category::Dairy),
                RecipeIngredient::new("5", "Panceta", 150.0, "g").with_category(Category::Meat),
            ])
            .with_instructions(vec![
                "Cocer la pasta en agua con sal".to_string(),
                "Mientras tanto, cortar la panceta en dados".to_string(),
                "Dorar la panceta y mezclar con la pasta y los huevos batidos".to_string(),
            ])
            .with_image("https://images.unsplash.com/photo-1612874742237-6526221588e3"),
        Recipe::new("2", "Ensalada César", 20, Difficulty::Easy)
            .with_description("Clásica ensalada César con pollo a la parrilla")
            .with_ingredients(vec![
                RecipeIngredient::new("3", "Pechuga de pollo", 200.0, "g")
                    .with_category(Category::Meat),
                RecipeIngredient::new("4", "Lechuga romana", 1.0, "unidad")
                    .with_category(Category::Produce),
            ])
            .with_instructions(vec![
                "Lavar y cortar la lechuga".to_string(),
                "Cocinar el pollo a la parrilla".to_string(),
            ])
            .with_image("https://images.unsplash.com/photo-1550304943-4f24f54ddde9"),
        Recipe::new("3", "Avena con frutas", 15, Difficulty::Easy)
            .with_description("Desayuno saludable")
            .with_ingredients(vec![
                RecipeIngredient::new("6", "Avena", 80.0, "g")
                    .with_category(Category::PantryStaples),
                RecipeIngredient::new("7", "Leche", 250.0, "ml").with_category(Category::Dairy),
                RecipeIngredient::new("8", "Plátano", 1.0, "unidad")
                    .with_category(Category::Produce),
            ])
            .with_instructions(vec![
                "Calentar la leche".to_string(),
                "Añadir la avena y cocinar cinco minutos".to_string(),
                "Servir con la fruta cortada".to_string(),
            ]),
    ]
}

/// The recipe collection, stored under `recipes`.
#[derive(Debug)]
pub struct RecipeCatalog<S> {
    store: S,
    recipes: Vec<Recipe>,
}

impl<S: KeyValueStore> RecipeCatalog<S> {
    /// Loads the stored recipes, or the samples if none are stored.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let recipes = match load_json(&store, StoreKey::Recipes)? {
            Some(recipes) => recipes,
            None => {
                tracing::debug!("No stored recipes, using samples");
                sample_recipes()
            }
        };
        Ok(Self { store, recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Like [`RecipeCatalog::get`], but a missing recipe is an error.
    pub fn require(&self, id: &str) -> Result<&Recipe, ChefError> {
        self.get(id).ok_or_else(|| ChefError::not_found("Recipe", id))
    }

    /// Recipes whose name or description contains `query` and that pass
    /// `filter`, in catalog order.
    pub fn search(&self, query: &str, filter: RecipeFilter, favorites: &[String]) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| query.trim().is_empty() || recipe.matches_search(query))
            .filter(|recipe| filter.matches(recipe, favorites))
            .collect()
    }

    /// Inserts or replaces a recipe by id and persists the catalog.
    ///
    /// Returns true if a recipe with the same id was replaced.
    pub fn upsert(&mut self, recipe: Recipe) -> Result<bool, ChefError> {
        let replaced = match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => {
                *existing = recipe;
                true
            }
            None => {
                self.recipes.push(recipe);
                false
            }
        };
        save_json(&self.store, StoreKey::Recipes, &self.recipes)?;
        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn names(recipes: Vec<&Recipe>) -> Vec<&str> {
        recipes.into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_load_uses_samples_when_empty() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        assert_eq!(catalog.recipes().len(), 3);
        assert_eq!(catalog.get("1").unwrap().name, "Pasta Carbonara");
    }

    #[test]
    fn test_sample_ingredients_are_distinct() {
        for recipe in sample_recipes() {
            let mut seen: Vec<(&str, &str)> = Vec::new();
            for ingredient in &recipe.ingredients {
                let key = (ingredient.display_name(), ingredient.unit.as_str());
                assert!(!seen.contains(&key), "duplicate in {}", recipe.name);
                seen.push(key);
            }
        }
    }

    #[test]
    fn test_search_name_and_description() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        assert_eq!(
            names(catalog.search("pollo", RecipeFilter::All, &[])),
            vec!["Ensalada César"]
        );
        assert_eq!(
            names(catalog.search("PASTA", RecipeFilter::All, &[])),
            vec!["Pasta Carbonara"]
        );
        assert_eq!(catalog.search("", RecipeFilter::All, &[]).len(), 3);
    }

    #[test]
    fn test_quick_filter_includes_thirty_minutes() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        assert_eq!(catalog.search("", RecipeFilter::Quick, &[]).len(), 3);
    }

    #[test]
    fn test_easy_filter() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        assert_eq!(
            names(catalog.search("", RecipeFilter::Easy, &[])),
            vec!["Ensalada César", "Avena con frutas"]
        );
    }

    #[test]
    fn test_favorites_filter() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        let favorites = vec!["2".to_string()];
        assert_eq!(
            names(catalog.search("", RecipeFilter::Favorites, &favorites)),
            vec!["Ensalada César"]
        );
        assert!(catalog.search("pasta", RecipeFilter::Favorites, &favorites).is_empty());
    }

    #[test]
    fn test_upsert_persists() {
        let store = MemoryStore::new();
        let mut catalog = RecipeCatalog::load(store.clone()).unwrap();

        let stew = Recipe::new("10", "Stew", 90, Difficulty::Hard);
        assert!(!catalog.upsert(stew).unwrap());
        let renamed = Recipe::new("10", "Beef stew", 90, Difficulty::Hard);
        assert!(catalog.upsert(renamed).unwrap());

        let reloaded = RecipeCatalog::load(store).unwrap();
        assert_eq!(reloaded.recipes().len(), 4);
        assert_eq!(reloaded.get("10").unwrap().name, "Beef stew");
    }

    #[test]
    fn test_require_missing() {
        let catalog = RecipeCatalog::load(MemoryStore::new()).unwrap();
        assert!(matches!(
            catalog.require("99"),
            Err(ChefError::NotFound { .. })
        ));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(RecipeFilter::from_str("Quick").unwrap(), RecipeFilter::Quick);
        assert!(RecipeFilter::from_str("vegan").is_err());
    }
}
