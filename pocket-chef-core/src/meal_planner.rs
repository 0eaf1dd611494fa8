//! Persisted weekly meal plans.
//!
//! Plans are stored together under `mealPlans`, one per user and week
//! start. Several users can share one store.

use chrono::NaiveDate;
use serde::de::Error as _;

use crate::error::ChefError;
use crate::models::{week_start, MealPlan};
use crate::store::{load_json, save_json, KeyValueStore, StorageError, StoreKey};

#[derive(Debug)]
pub struct MealPlanner<S> {
    store: S,
    user_id: String,
    plans: Vec<MealPlan>,
}

impl<S: KeyValueStore> MealPlanner<S> {
    pub fn load(store: S, user_id: impl Into<String>) -> Result<Self, StorageError> {
        let plans: Vec<MealPlan> = load_json(&store, StoreKey::MealPlans)?.unwrap_or_default();
        if let Some(bad) = plans.iter().find(|plan| !plan.is_well_formed()) {
            return Err(StorageError::Corrupted(
                StoreKey::MealPlans.as_str().to_string(),
                serde_json::Error::custom(format!(
                    "plan {} for week of {} is not seven consecutive days",
                    bad.id, bad.week_start_date
                )),
            ));
        }
        tracing::debug!(count = plans.len(), "Loaded meal plans");
        Ok(Self {
            store,
            user_id: user_id.into(),
            plans,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Plans owned by this planner's user.
    pub fn plans(&self) -> impl Iterator<Item = &MealPlan> {
        self.plans.iter().filter(|plan| plan.user_id == self.user_id)
    }

    /// The user's plan for the week containing `date`, or a new empty one.
    ///
    /// A new plan is not stored until it is saved.
    pub fn plan_for_week(&self, date: NaiveDate) -> MealPlan {
        let start = week_start(date);
        self.plans()
            .find(|plan| plan.week_start_date == start)
            .cloned()
            .unwrap_or_else(|| MealPlan::for_week(start, self.user_id.clone()))
    }

    /// Stores `plan` for this planner's user, replacing the user's plan for
    /// the same week. Other users' plans are kept as they are.
    pub fn save_plan(&mut self, mut plan: MealPlan) -> Result<(), ChefError> {
        plan.user_id = self.user_id.clone();
        let week = plan.week_start_date;
        match self
            .plans
            .iter_mut()
            .find(|existing| existing.user_id == self.user_id && existing.week_start_date == week)
        {
            Some(existing) => *existing = plan,
            None => {
                self.plans.push(plan);
                self.plans.sort_by(|a, b| {
                    (a.week_start_date, &a.user_id).cmp(&(b.week_start_date, &b.user_id))
                });
            }
        }

        save_json(&self.store, StoreKey::MealPlans, &self.plans)?;
        tracing::debug!(%week, "Saved meal plan");
        Ok(())
    }
}
