use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{notice, parse_date, today, OutputFormat};
use pocket_chef_core::models::navigate_week;
use pocket_chef_core::{FileStore, MealPlanner, MealSlot, MealType, RecipeCatalog, WeekDirection};

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

/// Picks a week relative to a date.
#[derive(Args, Clone)]
pub struct WeekArgs {
    /// Any date in the week (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    week: Option<String>,

    /// The week after
    #[arg(long, conflicts_with = "prev")]
    next: bool,

    /// The week before
    #[arg(long)]
    prev: bool,
}

impl WeekArgs {
    fn resolve(&self) -> Result<NaiveDate, String> {
        let date = match &self.week {
            Some(w) => parse_date(w)?,
            None => today(),
        };
        Ok(if self.next {
            navigate_week(date, WeekDirection::Next)
        } else if self.prev {
            navigate_week(date, WeekDirection::Previous)
        } else {
            date
        })
    }
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the meal plan for a week
    Show {
        #[command(flatten)]
        week: WeekArgs,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Assign a recipe to a meal
    Assign {
        /// Day (YYYY-MM-DD)
        date: String,

        /// Meal type (breakfast, lunch, dinner)
        meal_type: MealType,

        /// Recipe ID
        recipe_id: String,

        /// Number of servings
        #[arg(long, short, default_value_t = 1)]
        servings: u32,
    },

    /// Remove the recipe from a meal
    Clear {
        /// Day (YYYY-MM-DD)
        date: String,

        /// Meal type (breakfast, lunch, dinner)
        meal_type: MealType,
    },
}

impl PlanCommand {
    pub fn run(&self, store: &FileStore, user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(mut planner) = notice(MealPlanner::load(store.clone(), user_id))? else {
            return Ok(());
        };

        match &self.command {
            PlanSubcommand::Show { week, format } => {
                let plan = planner.plan_for_week(week.resolve()?);
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&plan)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", plan);
                        if plan.is_empty() {
                            println!("\nNothing planned yet");
                        }
                    }
                }
                Ok(())
            }

            PlanSubcommand::Assign {
                date,
                meal_type,
                recipe_id,
                servings,
            } => {
                let day = parse_date(date)?;
                if *servings == 0 {
                    return Err("Servings must be at least 1".into());
                }

                let Some(catalog) = notice(RecipeCatalog::load(store.clone()))? else {
                    return Ok(());
                };
                let Some(recipe) = notice(catalog.require(recipe_id))? else {
                    return Ok(());
                };

                let mut plan = planner.plan_for_week(day);
                let slot = MealSlot::new(&recipe.id, &recipe.name).with_servings(*servings);
                let Some(replaced) = notice(plan.assign(day, *meal_type, slot))? else {
                    return Ok(());
                };

                if notice(planner.save_plan(plan))?.is_some() {
                    match replaced {
                        Some(old) => println!(
                            "{} on {}: {} (replaces {})",
                            meal_type, day, recipe.name, old.recipe_name
                        ),
                        None => println!("{} on {}: {}", meal_type, day, recipe.name),
                    }
                }
                Ok(())
            }

            PlanSubcommand::Clear { date, meal_type } => {
                let day = parse_date(date)?;
                let mut plan = planner.plan_for_week(day);

                let Some(cleared) = notice(plan.clear(day, *meal_type))? else {
                    return Ok(());
                };
                let Some(old) = cleared else {
                    println!("Nothing planned for {} on {}", meal_type, day);
                    return Ok(());
                };

                if notice(planner.save_plan(plan))?.is_some() {
                    println!("Cleared {} on {} ({})", meal_type, day, old.recipe_name);
                }
                Ok(())
            }
        }
    }
}
