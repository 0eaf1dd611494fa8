use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::meal_type::MealType;
use crate::error::ChefError;

/// Number of days in a planned week.
pub const DAYS_PER_WEEK: usize = 7;

/// A recipe assigned to one meal of one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub recipe_id: String,
    pub recipe_name: String,
    pub servings: u32,
}

impl MealSlot {
    pub fn new(recipe_id: impl Into<String>, recipe_name: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            recipe_name: recipe_name.into(),
            servings: 1,
        }
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }
}

/// The three meal slots of a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMeal {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<MealSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<MealSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<MealSlot>,
}

impl DailyMeal {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    pub fn slot(&self, meal_type: MealType) -> Option<&MealSlot> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<MealSlot> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Iterates the assigned slots in meal order.
    pub fn slots(&self) -> impl Iterator<Item = (MealType, &MealSlot)> {
        MealType::ALL
            .into_iter()
            .filter_map(move |meal_type| self.slot(meal_type).map(|slot| (meal_type, slot)))
    }
}

/// Direction for moving between planned weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekDirection {
    Previous,
    Next,
}

/// Returns the week start `direction` away from `week_start`.
pub fn navigate_week(week_start: NaiveDate, direction: WeekDirection) -> NaiveDate {
    match direction {
        WeekDirection::Previous => week_start - Duration::days(DAYS_PER_WEEK as i64),
        WeekDirection::Next => week_start + Duration::days(DAYS_PER_WEEK as i64),
    }
}

/// Get the Sunday that starts the week containing the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_sunday = date.weekday().num_days_from_sunday();
    date - Duration::days(days_since_sunday as i64)
}

/// A weekly meal plan.
///
/// `meals` always holds exactly seven consecutive days starting at
/// `week_start_date`, which is always a Sunday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub meals: Vec<DailyMeal>,
}

impl MealPlan {
    /// Builds an empty plan for the week containing `date`.
    pub fn for_week(date: NaiveDate, user_id: impl Into<String>) -> Self {
        let start = week_start(date);
        let meals = (0..DAYS_PER_WEEK as i64)
            .map(|offset| DailyMeal::empty(start + Duration::days(offset)))
            .collect();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            week_start_date: start,
            meals,
        }
    }

    /// Last day covered by the plan.
    pub fn week_end_date(&self) -> NaiveDate {
        self.week_start_date + Duration::days(DAYS_PER_WEEK as i64 - 1)
    }

    /// True if the plan starts on a Sunday and holds exactly the seven
    /// consecutive days of that week, in order.
    pub fn is_well_formed(&self) -> bool {
        self.week_start_date == week_start(self.week_start_date)
            && self.meals.len() == DAYS_PER_WEEK
            && self
                .meals
                .iter()
                .enumerate()
                .all(|(offset, daily)| {
                    daily.date == self.week_start_date + Duration::days(offset as i64)
                })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.week_start_date && day <= self.week_end_date()
    }

    pub fn day(&self, day: NaiveDate) -> Option<&DailyMeal> {
        self.meals.iter().find(|meal| meal.date == day)
    }

    fn day_mut(&mut self, day: NaiveDate) -> Result<&mut DailyMeal, ChefError> {
        self.meals
            .iter_mut()
            .find(|meal| meal.date == day)
            .ok_or_else(|| ChefError::not_found("Day in current week", day.to_string()))
    }

    /// Sets one slot of one day, leaving every other slot untouched.
    ///
    /// Returns the slot that was replaced, if any.
    pub fn assign(
        &mut self,
        day: NaiveDate,
        meal_type: MealType,
        slot: MealSlot,
    ) -> Result<Option<MealSlot>, ChefError> {
        let daily = self.day_mut(day)?;
        Ok(daily.slot_mut(meal_type).replace(slot))
    }

    /// Empties one slot of one day.
    pub fn clear(
        &mut self,
        day: NaiveDate,
        meal_type: MealType,
    ) -> Result<Option<MealSlot>, ChefError> {
        let daily = self.day_mut(day)?;
        Ok(daily.slot_mut(meal_type).take())
    }

    /// Iterates every assigned slot of the week in date and meal order.
    pub fn assigned_slots(&self) -> impl Iterator<Item = (NaiveDate, MealType, &MealSlot)> {
        self.meals.iter().flat_map(|daily| {
            daily
                .slots()
                .map(move |(meal_type, slot)| (daily.date, meal_type, slot))
        })
    }

    /// Returns true if nothing has been planned yet.
    pub fn is_empty(&self) -> bool {
        self.assigned_slots().next().is_none()
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "Meal plan - Week of {}",
            self.week_start_date.format("%b %d, %Y")
        );
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;

        for daily in &self.meals {
            writeln!(f, "{}", daily.date.format("%a %b %d"))?;
            for meal_type in MealType::ALL {
                match daily.slot(meal_type) {
                    Some(slot) => writeln!(
                        f,
                        "  {:<10} {} (x{})",
                        meal_type, slot.recipe_name, slot.servings
                    )?,
                    None => writeln!(f, "  {:<10} -", meal_type)?,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
    }

    #[test]
    fn test_get_week_start_from_sunday() {
        assert_eq!(week_start(sunday()), sunday());
    }

    #[test]
    fn test_get_week_start_from_wednesday() {
        assert_eq!(week_start(wednesday()), sunday());
    }

    #[test]
    fn test_get_week_start_from_saturday() {
        let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        assert_eq!(week_start(saturday), sunday());
    }

    #[test]
    fn test_for_week_has_seven_consecutive_days() {
        let plan = MealPlan::for_week(wednesday(), "user1");

        assert_eq!(plan.week_start_date, sunday());
        assert_eq!(plan.meals.len(), DAYS_PER_WEEK);
        for (offset, daily) in plan.meals.iter().enumerate() {
            assert_eq!(daily.date, sunday() + Duration::days(offset as i64));
            assert!(daily.breakfast.is_none());
            assert!(daily.lunch.is_none());
            assert!(daily.dinner.is_none());
        }
        assert!(plan.is_empty());
    }

    #[test]
    fn test_is_well_formed() {
        let plan = MealPlan::for_week(wednesday(), "user1");
        assert!(plan.is_well_formed());

        let mut short = plan.clone();
        short.meals.pop();
        assert!(!short.is_well_formed());

        let mut gap = plan.clone();
        gap.meals[3].date = gap.meals[3].date + Duration::days(1);
        assert!(!gap.is_well_formed());

        let mut midweek = plan;
        midweek.week_start_date = wednesday();
        assert!(!midweek.is_well_formed());
    }

    #[test]
    fn test_assign_leaves_other_slots_untouched() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        plan.assign(wednesday(), MealType::Lunch, MealSlot::new("2", "Pasta Carbonara"))
            .unwrap();

        let day = plan.day(wednesday()).unwrap();
        assert_eq!(day.lunch.as_ref().unwrap().recipe_id, "2");
        assert_eq!(day.lunch.as_ref().unwrap().servings, 1);
        assert!(day.breakfast.is_none());
        assert!(day.dinner.is_none());
        assert_eq!(plan.assigned_slots().count(), 1);
    }

    #[test]
    fn test_assign_replaces_existing_slot() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        plan.assign(wednesday(), MealType::Dinner, MealSlot::new("1", "Soup"))
            .unwrap();
        let replaced = plan
            .assign(wednesday(), MealType::Dinner, MealSlot::new("2", "Pasta"))
            .unwrap();

        assert_eq!(replaced.unwrap().recipe_id, "1");
    }

    #[test]
    fn test_assign_outside_week_is_not_found() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        let next_week = wednesday() + Duration::days(7);

        let result = plan.assign(next_week, MealType::Lunch, MealSlot::new("1", "Soup"));
        assert!(matches!(result, Err(ChefError::NotFound { .. })));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_clear_slot() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        plan.assign(sunday(), MealType::Breakfast, MealSlot::new("1", "Oatmeal"))
            .unwrap();

        let cleared = plan.clear(sunday(), MealType::Breakfast).unwrap();
        assert_eq!(cleared.unwrap().recipe_name, "Oatmeal");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_navigate_week() {
        assert_eq!(
            navigate_week(sunday(), WeekDirection::Next),
            NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()
        );
        assert_eq!(
            navigate_week(sunday(), WeekDirection::Previous),
            NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()
        );
    }

    #[test]
    fn test_contains() {
        let plan = MealPlan::for_week(wednesday(), "user1");
        assert!(plan.contains(sunday()));
        assert!(plan.contains(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()));
        assert!(!plan.contains(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
    }

    #[test]
    fn test_meal_plan_display() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        plan.assign(wednesday(), MealType::Dinner, MealSlot::new("2", "Pasta Carbonara"))
            .unwrap();

        let output = format!("{}", plan);
        assert!(output.contains("Week of Jan 11, 2026"));
        assert!(output.contains("Pasta Carbonara (x1)"));
    }

    #[test]
    fn test_meal_plan_json_roundtrip() {
        let mut plan = MealPlan::for_week(wednesday(), "user1");
        plan.assign(wednesday(), MealType::Dinner, MealSlot::new("2", "Pasta"))
            .unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("weekStartDate"));
        let parsed: MealPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan);
    }
}
