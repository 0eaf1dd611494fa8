//! Shopping list CLI commands.
//!
//! Items are added by hand, from a recipe, or from the recipes planned for
//! a week.

use clap::{Args, Subcommand};

use super::{confirm, notice, parse_date, today, OutputFormat};
use pocket_chef_core::models::format_quantity;
use pocket_chef_core::{
    Category, FileStore, ItemDraft, MealPlanner, MergeReport, RecipeCatalog, ShoppingList,
};

#[derive(Args)]
pub struct ShoppingCommand {
    #[command(subcommand)]
    pub command: ShoppingSubcommand,
}

#[derive(Subcommand)]
pub enum ShoppingSubcommand {
    /// List the shopping list grouped by category
    List {
        /// Only items whose name contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an item to the shopping list
    Add {
        /// Item name
        name: String,

        /// Quantity
        #[arg(long, short)]
        qty: Option<f64>,

        /// Unit (e.g., "kg", "L", "units")
        #[arg(long, short)]
        unit: Option<String>,

        /// Category (label or alias, e.g. "beverages")
        #[arg(long, short)]
        category: Option<Category>,
    },

    /// Check or uncheck an item
    Toggle {
        /// Item ID
        id: String,
    },

    /// Delete an item from the shopping list
    Delete {
        /// Item ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Remove every checked item
    ClearChecked {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Add the ingredients of a recipe
    AddRecipe {
        /// Recipe ID
        recipe_id: String,

        /// Multiply the ingredient quantities
        #[arg(long, short, default_value_t = 1)]
        servings: u32,
    },

    /// Add the ingredients of every recipe planned for a week
    FromPlan {
        /// Any date in the week (YYYY-MM-DD), defaults to the current week
        #[arg(long, short)]
        week: Option<String>,
    },
}

impl ShoppingCommand {
    pub fn run(&self, store: &FileStore, user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(mut list) = notice(ShoppingList::load(store.clone()))? else {
            return Ok(());
        };

        match &self.command {
            ShoppingSubcommand::List { search, format } => {
                let groups = list.grouped(search.as_deref().unwrap_or(""));

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&groups)?);
                    }
                    OutputFormat::Text => {
                        if groups.is_empty() {
                            println!("Shopping list is empty");
                            return Ok(());
                        }

                        for group in &groups {
                            println!("{}", group.category);
                            println!("{}", "-".repeat(group.category.label().chars().count()));
                            for item in &group.items {
                                println!("  {}  [{}]", item, item.id);
                            }
                            println!();
                        }

                        let total: usize = groups.iter().map(|g| g.items.len()).sum();
                        let checked: usize = groups
                            .iter()
                            .flat_map(|g| g.items.iter())
                            .filter(|item| item.checked)
                            .count();
                        println!("Total: {} item(s), {} checked", total, checked);
                    }
                }
                Ok(())
            }

            ShoppingSubcommand::Add {
                name,
                qty,
                unit,
                category,
            } => {
                let draft = ItemDraft {
                    name: Some(name.clone()),
                    quantity: *qty,
                    unit: unit.clone(),
                    category: *category,
                    expiration_date: None,
                };

                if let Some(item) = notice(list.add_item(draft))? {
                    println!("Added: {}  [{}]", item, item.id);
                }
                Ok(())
            }

            ShoppingSubcommand::Toggle { id } => {
                if let Some(checked) = notice(list.toggle_checked(id))? {
                    let name = list.get(id).map(|item| item.name.as_str()).unwrap_or(id);
                    if checked {
                        println!("Checked: {}", name);
                    } else {
                        println!("Unchecked: {}", name);
                    }
                }
                Ok(())
            }

            ShoppingSubcommand::Delete { id, force } => {
                let Some(pending) = notice(list.request_delete(id))? else {
                    return Ok(());
                };

                let name = pending
                    .targets()
                    .first()
                    .map(|item| item.name.clone())
                    .unwrap_or_default();

                if !force && !confirm(&format!("Delete '{}' from the shopping list?", name))? {
                    pending.cancel();
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                if notice(pending.confirm())?.is_some() {
                    println!("Deleted: {}", name);
                }
                Ok(())
            }

            ShoppingSubcommand::ClearChecked { force } => {
                let pending = list.request_clear_checked();
                if pending.is_empty() {
                    println!("No checked items to clear");
                    return Ok(());
                }

                let count = pending.len();
                if !force && !confirm(&format!("Remove {} checked item(s)?", count))? {
                    pending.cancel();
                    println!("Nothing removed.");
                    return Ok(());
                }

                if let Some(removed) = notice(pending.confirm())? {
                    println!("Removed {} checked item(s)", removed.len());
                }
                Ok(())
            }

            ShoppingSubcommand::AddRecipe {
                recipe_id,
                servings,
            } => {
                let Some(catalog) = notice(RecipeCatalog::load(store.clone()))? else {
                    return Ok(());
                };
                let Some(recipe) = notice(catalog.require(recipe_id))? else {
                    return Ok(());
                };

                if let Some(report) = notice(list.add_recipe_ingredients(recipe, *servings))? {
                    println!("Ingredients of '{}':", recipe.name);
                    for ingredient in &recipe.ingredients {
                        println!(
                            "  - {} {} {}",
                            format_quantity(ingredient.quantity * f64::from((*servings).max(1))),
                            ingredient.unit,
                            ingredient.display_name()
                        );
                    }
                    print_report(&report);
                }
                Ok(())
            }

            ShoppingSubcommand::FromPlan { week } => {
                let date = match week {
                    Some(w) => parse_date(w)?,
                    None => today(),
                };

                let Some(planner) = notice(MealPlanner::load(store.clone(), user_id))? else {
                    return Ok(());
                };
                let Some(catalog) = notice(RecipeCatalog::load(store.clone()))? else {
                    return Ok(());
                };

                let plan = planner.plan_for_week(date);
                if plan.is_empty() {
                    println!(
                        "Nothing planned for the week of {}",
                        plan.week_start_date.format("%b %d, %Y")
                    );
                    return Ok(());
                }

                if let Some(report) = notice(list.add_from_meal_plan(&plan, &catalog))? {
                    print_report(&report);
                }
                Ok(())
            }
        }
    }
}

fn print_report(report: &MergeReport) {
    println!(
        "Added {} item(s), updated {} existing item(s)",
        report.added, report.merged
    );
    for id in &report.missing_recipes {
        eprintln!("warning: recipe {} not found, skipped", id);
    }
}
