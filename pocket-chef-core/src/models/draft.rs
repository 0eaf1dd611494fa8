use crate::error::ValidationError;

use super::Category;

/// User input for a new pantry or shopping list item.
///
/// Every field is optional so that a half-filled form can be represented;
/// [`ItemDraft::validate`] reports what is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<Category>,
    /// Only used by the pantry.
    pub expiration_date: Option<String>,
}

/// A draft whose required fields are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    pub expiration_date: Option<String>,
}

impl ItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_expiration_date(mut self, date: impl Into<String>) -> Self {
        self.expiration_date = Some(date.into());
        self
    }

    /// Checks that name, quantity, unit and category are all present.
    ///
    /// Blank strings count as missing, and so does a quantity that is zero,
    /// negative or not finite.
    pub fn validate(self) -> Result<ValidDraft, ValidationError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let quantity = self.quantity.filter(|q| q.is_finite() && *q > 0.0);
        let unit = self
            .unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        let expiration_date = self
            .expiration_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        match (name, quantity, unit, self.category) {
            (Some(name), Some(quantity), Some(unit), Some(category)) => Ok(ValidDraft {
                name,
                quantity,
                unit,
                category,
                expiration_date,
            }),
            (name, quantity, unit, category) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("name");
                }
                if quantity.is_none() {
                    missing.push("quantity");
                }
                if unit.is_none() {
                    missing.push("unit");
                }
                if category.is_none() {
                    missing.push("category");
                }
                Err(ValidationError::new(missing))
            }
        }
    }
}
