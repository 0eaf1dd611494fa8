use serde::{Deserialize, Serialize};
use std::fmt;

/// Nutrition facts as printed on the package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NutritionalInfo {
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fat: Option<String>,
}

/// A packaged product identified by its barcode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub barcode: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Package size as printed (e.g., "500g").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        if !self.barcode.is_empty() {
            writeln!(f, "Barcode: {}", self.barcode)?;
        }
        if let Some(brand) = &self.brand {
            writeln!(f, "Brand: {}", brand)?;
        }
        if let Some(quantity) = &self.quantity {
            writeln!(f, "Quantity: {}", quantity)?;
        }
        if let Some(ingredients) = &self.ingredients {
            writeln!(f, "Ingredients: {}", ingredients)?;
        }
        if let Some(info) = &self.nutritional_info {
            writeln!(f, "\nNutrition:")?;
            let rows = [
                ("calories", &info.calories),
                ("protein", &info.protein),
                ("carbs", &info.carbs),
                ("fat", &info.fat),
            ];
            for (label, value) in rows {
                if let Some(value) = value {
                    writeln!(f, "  - {}: {}", label, value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_json() {
        let json = r#"{
            "barcode": "7501055300075",
            "name": "Example product",
            "brand": "Example brand",
            "quantity": "500g",
            "nutritionalInfo": { "calories": "200kcal", "protein": "5g" }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.brand.as_deref(), Some("Example brand"));
        let info = product.nutritional_info.unwrap();
        assert_eq!(info.calories.as_deref(), Some("200kcal"));
        assert!(info.fat.is_none());
    }

    #[test]
    fn test_product_display() {
        let product = Product {
            barcode: "123".into(),
            name: "Oat milk".into(),
            brand: Some("Oatly".into()),
            quantity: Some("1L".into()),
            ingredients: None,
            nutritional_info: Some(NutritionalInfo {
                calories: Some("46kcal".into()),
                ..Default::default()
            }),
        };
        let output = format!("{}", product);
        assert!(output.contains("Brand: Oatly"));
        assert!(output.contains("calories: 46kcal"));
        assert!(!output.contains("protein"));
    }
}
