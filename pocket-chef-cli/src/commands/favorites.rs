use clap::{Args, Subcommand};

use super::{notice, OutputFormat};
use pocket_chef_core::{Favorites, FileStore, Recipe, RecipeCatalog};

#[derive(Args)]
pub struct FavoritesCommand {
    #[command(subcommand)]
    pub command: FavoritesSubcommand,
}

#[derive(Subcommand)]
pub enum FavoritesSubcommand {
    /// List favorite recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark or unmark a recipe as favorite
    Toggle {
        /// Recipe ID
        recipe_id: String,
    },
}

impl FavoritesCommand {
    pub fn run(
        &self,
        favorites: &mut Favorites<FileStore>,
        store: &FileStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some(catalog) = notice(RecipeCatalog::load(store.clone()))? else {
            return Ok(());
        };

        match &self.command {
            FavoritesSubcommand::List { format } => {
                let recipes: Vec<&Recipe> = favorites
                    .ids()
                    .iter()
                    .filter_map(|id| catalog.get(id))
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        if favorites.is_empty() {
                            println!("No favorite recipes yet");
                            return Ok(());
                        }
                        for id in favorites.ids() {
                            match catalog.get(id) {
                                Some(recipe) => println!("{:>4}  {}", recipe.id, recipe.name),
                                None => println!("{:>4}  (unknown recipe)", id),
                            }
                        }
                    }
                }
                Ok(())
            }

            FavoritesSubcommand::Toggle { recipe_id } => {
                // Unknown ids can still be removed, but not added.
                if !favorites.contains(recipe_id) && notice(catalog.require(recipe_id))?.is_none() {
                    return Ok(());
                }

                if let Some(now_favorite) = notice(favorites.toggle(recipe_id))? {
                    let name = catalog
                        .get(recipe_id)
                        .map(|r| r.name.as_str())
                        .unwrap_or(recipe_id);
                    if now_favorite {
                        println!("Added to favorites: {}", name);
                    } else {
                        println!("Removed from favorites: {}", name);
                    }
                }
                Ok(())
            }
        }
    }
}
