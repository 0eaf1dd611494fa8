use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification shared by pantry and shopping list items.
///
/// Serialized as the Spanish label, which is what the persisted
/// collections have always contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Frutas y Verduras")]
    Produce,
    #[serde(rename = "Lácteos")]
    Dairy,
    #[serde(rename = "Carnes")]
    Meat,
    #[serde(rename = "Despensa")]
    PantryStaples,
    #[serde(rename = "Condimentos")]
    Condiments,
    #[serde(rename = "Bebidas")]
    Beverages,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Produce,
        Category::Dairy,
        Category::Meat,
        Category::PantryStaples,
        Category::Condiments,
        Category::Beverages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Produce => "Frutas y Verduras",
            Category::Dairy => "Lácteos",
            Category::Meat => "Carnes",
            Category::PantryStaples => "Despensa",
            Category::Condiments => "Condimentos",
            Category::Beverages => "Bebidas",
        }
    }

    /// Short English alias, accepted on the command line.
    pub fn alias(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::PantryStaples => "pantry",
            Category::Condiments => "condiments",
            Category::Beverages => "beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.alias() == needle)
            .ok_or_else(|| {
                format!(
                    "Invalid category '{}'. Valid options: produce, dairy, meat, pantry, condiments, beverages",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", Category::Dairy), "Lácteos");
        assert_eq!(format!("{}", Category::Produce), "Frutas y Verduras");
    }

    #[test]
    fn test_category_from_label_and_alias() {
        assert_eq!(Category::from_str("Lácteos").unwrap(), Category::Dairy);
        assert_eq!(Category::from_str("lácteos").unwrap(), Category::Dairy);
        assert_eq!(Category::from_str("DAIRY").unwrap(), Category::Dairy);
        assert_eq!(
            Category::from_str("frutas y verduras").unwrap(),
            Category::Produce
        );
        assert_eq!(
            Category::from_str("pantry").unwrap(),
            Category::PantryStaples
        );
    }

    #[test]
    fn test_category_from_str_invalid() {
        assert!(Category::from_str("snacks").is_err());
        assert!(Category::from_str("").is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Dairy).unwrap();
        assert_eq!(json, "\"Lácteos\"");

        let parsed: Category = serde_json::from_str("\"Bebidas\"").unwrap();
        assert_eq!(parsed, Category::Beverages);
    }

    #[test]
    fn test_all_is_in_declared_order() {
        assert_eq!(Category::ALL[0], Category::Produce);
        assert_eq!(Category::ALL[5], Category::Beverages);
    }
}
