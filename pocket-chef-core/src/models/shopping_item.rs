//! Items on the shopping list.
//!
//! Items are added by hand, from a recipe's ingredients, or from the
//! recipes of a weekly meal plan. Checked items stay on the list until they
//! are cleared or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::draft::ValidDraft;
use super::{format_quantity, Category};

/// Where a shopping list item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSource {
    Manual,
    Recipe,
    MealPlan,
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSource::Manual => write!(f, "manual"),
            ItemSource::Recipe => write!(f, "recipe"),
            ItemSource::MealPlan => write!(f, "meal plan"),
        }
    }
}

/// An item to buy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    #[serde(default)]
    pub checked: bool,
    pub added_at: DateTime<Utc>,
    pub source: ItemSource,
}

impl ShoppingListItem {
    pub fn from_draft(
        id: impl Into<String>,
        draft: ValidDraft,
        source: ItemSource,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            checked: false,
            added_at: now,
            source,
        }
    }

    /// Case-insensitive substring match on the name.
    pub fn matches_search(&self, search: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&search.to_lowercase())
    }

    /// True if `other_name`/`other_unit` describe the same thing to buy.
    pub fn same_product(&self, other_name: &str, other_unit: &str) -> bool {
        self.name.to_lowercase() == other_name.to_lowercase()
            && self.unit.to_lowercase() == other_unit.to_lowercase()
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.checked { "[x]" } else { "[ ]" };
        if self.unit.is_empty() {
            write!(
                f,
                "{} {:<25} {}",
                check,
                self.name,
                format_quantity(self.quantity)
            )
        } else {
            write!(
                f,
                "{} {:<25} {} {}",
                check,
                self.name,
                format_quantity(self.quantity),
                self.unit
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eggs() -> ShoppingListItem {
        let draft = ValidDraft {
            name: "Eggs".into(),
            quantity: 12.0,
            unit: "units".into(),
            category: Category::Dairy,
            expiration_date: None,
        };
        ShoppingListItem::from_draft("1", draft, ItemSource::Manual, Utc::now())
    }

    #[test]
    fn test_new_item_is_unchecked() {
        let item = eggs();
        assert!(!item.checked);
        assert_eq!(item.source, ItemSource::Manual);
    }

    #[test]
    fn test_same_product_ignores_case() {
        let item = eggs();
        assert!(item.same_product("eggs", "UNITS"));
        assert!(!item.same_product("eggs", "dozen"));
    }

    #[test]
    fn test_display() {
        let mut item = eggs();
        assert_eq!(
            format!("{}", item),
            format!("[ ] {:<25} 12 units", "Eggs")
        );
        item.checked = true;
        assert!(format!("{}", item).starts_with("[x]"));
    }

    #[test]
    fn test_source_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&ItemSource::MealPlan).unwrap(),
            "\"mealPlan\""
        );
        assert_eq!(
            serde_json::to_string(&ItemSource::Manual).unwrap(),
            "\"manual\""
        );
    }

    #[test]
    fn test_checked_defaults_to_false() {
        let json = r#"{
            "id": "1",
            "name": "Water",
            "quantity": 6,
            "unit": "L",
            "category": "Bebidas",
            "addedAt": "2026-03-10T08:00:00Z",
            "source": "manual"
        }"#;
        let item: ShoppingListItem = serde_json::from_str(json).unwrap();
        assert!(!item.checked);
        assert_eq!(item.category, Category::Beverages);
    }
}
