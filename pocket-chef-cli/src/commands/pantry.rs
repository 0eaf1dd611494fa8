//! Pantry CLI commands.

use clap::{Args, Subcommand};

use super::{confirm, notice, today, OutputFormat};
use pocket_chef_core::models::{format_expiration_date, WARNING_WINDOW_DAYS};
use pocket_chef_core::{Category, FileStore, ItemDraft, PantryInventory, PantryItem};

#[derive(Args)]
pub struct PantryCommand {
    #[command(subcommand)]
    pub command: PantrySubcommand,
}

#[derive(Subcommand)]
pub enum PantrySubcommand {
    /// List pantry items with their expiration status
    List {
        /// Only items whose name contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Only items in this category (label or alias, e.g. "dairy")
        #[arg(long, short)]
        category: Option<Category>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an item to the pantry
    Add {
        /// Item name
        name: String,

        /// Quantity
        #[arg(long, short)]
        qty: Option<f64>,

        /// Unit (e.g., "kg", "L", "units")
        #[arg(long, short)]
        unit: Option<String>,

        /// Category (label or alias, e.g. "produce")
        #[arg(long, short)]
        category: Option<Category>,

        /// Expiration date (YYYY-MM-DD)
        #[arg(long, short)]
        expires: Option<String>,
    },

    /// Increase or decrease the quantity of an item
    Adjust {
        /// Item ID
        id: String,

        /// Amount to add (negative to remove); never goes below 1
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },

    /// Delete an item from the pantry
    Delete {
        /// Item ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List items that are expired or expire soon
    Expiring {
        /// How many days ahead to look
        #[arg(long, short, default_value_t = WARNING_WINDOW_DAYS)]
        days: i64,
    },
}

impl PantryCommand {
    pub fn run(&self, store: &FileStore) -> Result<(), Box<dyn std::error::Error>> {
        let Some(mut pantry) = notice(PantryInventory::load(store.clone()))? else {
            return Ok(());
        };

        match &self.command {
            PantrySubcommand::List {
                search,
                category,
                format,
            } => {
                let items = pantry.filter(search.as_deref().unwrap_or(""), *category);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => {
                        if items.is_empty() {
                            println!("No pantry items found");
                            return Ok(());
                        }
                        for item in &items {
                            print_item(item);
                        }
                        println!("\nTotal: {} item(s)", items.len());
                    }
                }
                Ok(())
            }

            PantrySubcommand::Add {
                name,
                qty,
                unit,
                category,
                expires,
            } => {
                let draft = ItemDraft {
                    name: Some(name.clone()),
                    quantity: *qty,
                    unit: unit.clone(),
                    category: *category,
                    expiration_date: expires.clone(),
                };

                if let Some(item) = notice(pantry.add_item(draft))? {
                    println!("Added to pantry:");
                    print_item(&item);
                }
                Ok(())
            }

            PantrySubcommand::Adjust { id, delta } => {
                if let Some(item) = notice(pantry.adjust_quantity(id, *delta))? {
                    println!("Updated: {}", item);
                }
                Ok(())
            }

            PantrySubcommand::Delete { id, force } => {
                let Some(pending) = notice(pantry.request_delete(id))? else {
                    return Ok(());
                };

                let name = pending
                    .targets()
                    .first()
                    .map(|item| item.name.clone())
                    .unwrap_or_default();

                if !force && !confirm(&format!("Delete '{}' from the pantry?", name))? {
                    pending.cancel();
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                if notice(pending.confirm())?.is_some() {
                    println!("Deleted: {}", name);
                }
                Ok(())
            }

            PantrySubcommand::Expiring { days } => {
                let expiring = pantry.expiring_within(today(), *days);
                if expiring.is_empty() {
                    println!("Nothing expires in the next {} day(s)", days);
                    return Ok(());
                }

                for (item, status) in &expiring {
                    println!("{:<25} {:<16} {}", item.name, status.label(), status.message());
                }
                println!("\nTotal: {} item(s)", expiring.len());
                Ok(())
            }
        }
    }
}

fn print_item(item: &PantryItem) {
    println!("{}  [{}]", item, item.id);
    if let Some(date) = &item.expiration_date {
        let status = item.expiration_status(today());
        println!(
            "    expires {}: {}",
            format_expiration_date(date),
            status.message()
        );
    }
}
