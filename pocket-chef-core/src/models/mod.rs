mod category;
mod draft;
mod expiration;
mod meal_plan;
mod meal_type;
mod pantry_item;
mod product;
mod recipe;
mod shopping_item;

pub use category::Category;
pub use draft::{ItemDraft, ValidDraft};
pub use expiration::{
    classify_expiration, format_expiration_date, parse_expiration_date, ExpirationStatus,
    WARNING_WINDOW_DAYS,
};
pub use meal_plan::{
    navigate_week, week_start, DailyMeal, MealPlan, MealSlot, WeekDirection, DAYS_PER_WEEK,
};
pub use meal_type::MealType;
pub use pantry_item::{PantryItem, MIN_QUANTITY};
pub use product::{NutritionalInfo, Product};
pub use recipe::{Difficulty, Recipe, RecipeIngredient, QUICK_RECIPE_MINUTES};
pub use shopping_item::{ItemSource, ShoppingListItem};

/// Format a quantity, dropping the decimal part when it is a whole number.
pub fn format_quantity(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{:.1}", qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(format_quantity(1.26), "1.3");
    }
}
