//! Recipe browsing, cooking mode and fetching.

use clap::{Args, Subcommand};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use super::{block_on, notice, OutputFormat};
use pocket_chef_core::{
    format_timer, CookingSession, Favorites, FileStore, LookupClient, RecipeCatalog, RecipeFilter,
};

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// List recipes
    List {
        /// Only recipes whose name or description contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Quick filter: all, quick, easy, favorites
        #[arg(long, default_value = "all")]
        filter: RecipeFilter,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show recipe details
    Show {
        /// Recipe ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Cook a recipe step by step
    Steps {
        /// Recipe ID
        id: String,
    },

    /// Fetch a recipe from the recipe API and add it to the catalog
    Fetch {
        /// Recipe ID
        id: String,
    },
}

impl RecipeCommand {
    pub fn run(
        &self,
        favorites: &Favorites<FileStore>,
        store: &FileStore,
        api_url: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Some(mut catalog) = notice(RecipeCatalog::load(store.clone()))? else {
            return Ok(());
        };

        match &self.command {
            RecipeSubcommand::List {
                search,
                filter,
                format,
            } => {
                let recipes =
                    catalog.search(search.as_deref().unwrap_or(""), *filter, favorites.ids());

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        if recipes.is_empty() {
                            println!("No recipes found");
                            return Ok(());
                        }
                        for recipe in &recipes {
                            let star = if favorites.contains(&recipe.id) { "*" } else { " " };
                            println!(
                                "{} {:>4}  {:<25} {:>3} min  {}",
                                star, recipe.id, recipe.name, recipe.preparation_time, recipe.difficulty
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { id, format } => {
                let Some(recipe) = notice(catalog.require(id))? else {
                    return Ok(());
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipe)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", recipe);
                        if favorites.contains(&recipe.id) {
                            println!("\n* Favorite");
                        }
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Steps { id } => {
                let Some(recipe) = notice(catalog.require(id))? else {
                    return Ok(());
                };
                if recipe.instructions.is_empty() {
                    println!("'{}' has no steps", recipe.name);
                    return Ok(());
                }

                let mut session = CookingSession::new(recipe);
                let stdin = io::stdin();
                cook(&mut session, stdin.lock())?;
                Ok(())
            }

            RecipeSubcommand::Fetch { id } => {
                let client = LookupClient::new(api_url)?;
                let recipe = match block_on(client.fetch_recipe(id))? {
                    Ok(recipe) => recipe,
                    Err(e) if e.is_not_found() => {
                        eprintln!("warning: recipe {} not found at {}", id, client.base_url());
                        return Ok(());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Recipe lookup failed");
                        eprintln!("warning: {}", e);
                        return Ok(());
                    }
                };

                let name = recipe.name.clone();
                if let Some(replaced) = notice(catalog.upsert(recipe))? {
                    if replaced {
                        println!("Updated recipe: {}", name);
                    } else {
                        println!("Added recipe: {}", name);
                    }
                }
                Ok(())
            }
        }
    }
}

/// Interactive cooking loop.
///
/// Commands: Enter or `n` next, `p` previous, `d` mark the current step
/// done, `t <minutes>` run a timer, `q` quit.
fn cook(session: &mut CookingSession<'_>, input: impl BufRead) -> io::Result<()> {
    println!("{}", session.recipe().name);
    println!("[Enter/n] next  [p] previous  [d] done  [t <min>] timer  [q] quit\n");
    print_step(session);

    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None | Some("n") => {
                if !session.next_step() {
                    println!("That was the last step.");
                }
            }
            Some("p") => {
                if !session.previous_step() {
                    println!("Already at the first step.");
                }
            }
            Some("d") => {
                session.toggle_step(session.current_index());
            }
            Some("t") => {
                match parts.next().and_then(|m| m.parse::<u64>().ok()) {
                    Some(minutes) => run_timer(minutes * 60)?,
                    None => println!("Usage: t <minutes>"),
                }
            }
            Some("q") => break,
            Some(other) => println!("Unknown command '{}'", other),
        }

        if session.is_finished() {
            println!("All steps done. Enjoy your meal!");
            break;
        }
        print_step(session);
    }
    Ok(())
}

fn print_step(session: &CookingSession<'_>) {
    let index = session.current_index();
    let (done, total) = session.progress();
    let mark = if session.is_completed(index) { "x" } else { " " };
    println!(
        "Step {} of {} ({} done)\n  [{}] {}",
        index + 1,
        total,
        done,
        mark,
        session.current_step().unwrap_or_default()
    );
    print!("> ");
    let _ = io::stdout().flush();
}

fn run_timer(seconds: u64) -> io::Result<()> {
    let mut stdout = io::stdout();
    for remaining in (0..=seconds).rev() {
        write!(stdout, "\r{}", format_timer(remaining))?;
        stdout.flush()?;
        if remaining > 0 {
            thread::sleep(Duration::from_secs(1));
        }
    }
    writeln!(stdout, "\nTime's up!")?;
    Ok(())
}
