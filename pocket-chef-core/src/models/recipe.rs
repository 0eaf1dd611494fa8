use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{format_quantity, Category};

/// Recipes at or under this many minutes count as quick.
pub const QUICK_RECIPE_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid options: easy, medium, hard",
                s
            )),
        }
    }
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    /// Display name; older payloads only carry the id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl RecipeIngredient {
    pub fn new(
        ingredient_id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Name to show and to put on the shopping list.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.ingredient_id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} {}", format_quantity(self.quantity), self.display_name())
        } else {
            write!(
                f,
                "{} {} {}",
                format_quantity(self.quantity),
                self.unit,
                self.display_name()
            )
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Minutes
    pub preparation_time: u32,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        preparation_time: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            preparation_time,
            difficulty,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<RecipeIngredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_quick(&self) -> bool {
        self.preparation_time <= QUICK_RECIPE_MINUTES
    }

    /// Case-insensitive match against name or description.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(
            f,
            "Time: {} min | Difficulty: {}",
            self.preparation_time, self.difficulty
        )?;

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (index, step) in self.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", index + 1, step)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbonara() -> Recipe {
        Recipe::new("1", "Pasta Carbonara", 30, Difficulty::Medium)
            .with_description("Traditional Italian carbonara")
            .with_ingredients(vec![
                RecipeIngredient::new("1", "Spaghetti", 400.0, "g"),
                RecipeIngredient::new("2", "", 4.0, "units"),
            ])
            .with_instructions(vec!["Boil the pasta".into(), "Dice the pancetta".into()])
    }

    #[test]
    fn test_is_quick() {
        assert!(carbonara().is_quick());
        let slow = Recipe::new("9", "Stew", 31, Difficulty::Hard);
        assert!(!slow.is_quick());
    }

    #[test]
    fn test_matches_search_name_or_description() {
        let recipe = carbonara();
        assert!(recipe.matches_search("carbo"));
        assert!(recipe.matches_search("ITALIAN"));
        assert!(!recipe.matches_search("salad"));
    }

    #[test]
    fn test_ingredient_display_name_falls_back_to_id() {
        let recipe = carbonara();
        assert_eq!(recipe.ingredients[0].display_name(), "Spaghetti");
        assert_eq!(recipe.ingredients[1].display_name(), "2");
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY").unwrap(), Difficulty::Easy);
        assert!(Difficulty::from_str("extreme").is_err());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let json = r#"{
            "id": "7",
            "name": "Avena con frutas",
            "description": "Desayuno saludable",
            "ingredients": [{ "ingredientId": "3", "quantity": 200, "unit": "g" }],
            "instructions": [],
            "preparationTime": 15,
            "difficulty": "easy"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.preparation_time, 15);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients[0].display_name(), "3");
        assert!(recipe.image.is_none());
    }

    #[test]
    fn test_recipe_display() {
        let output = format!("{}", carbonara());
        assert!(output.contains("Pasta Carbonara"));
        assert!(output.contains("400 g Spaghetti"));
        assert!(output.contains("1. Boil the pasta"));
    }
}
