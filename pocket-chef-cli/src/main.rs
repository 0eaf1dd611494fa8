use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{
    notice, ConfigCommand, FavoritesCommand, PantryCommand, PlanCommand, ProductCommand,
    RecipeCommand, ShoppingCommand,
};
use config::Config;
use pocket_chef_core::{Favorites, FileStore};

#[derive(Parser)]
#[command(name = "chef")]
#[command(version)]
#[command(about = "Pantry, shopping list and meal planning from the command line", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track what is in the pantry and when it expires
    Pantry(PantryCommand),

    /// Manage the shopping list
    Shopping(ShoppingCommand),

    /// Mark recipes as favorite
    Favorites(FavoritesCommand),

    /// Browse, cook and fetch recipes
    Recipe(RecipeCommand),

    /// Plan meals for the week
    Plan(PlanCommand),

    /// Look up scanned products
    Product(ProductCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config_path = cli.config.clone();
    let config = Config::load(cli.config)?;

    init_tracing(&config.log_level.value);
    tracing::debug!(data_dir = %config.data_dir.value.display(), "Loaded configuration");

    execute_command(&cli.command, &config, cli_config_path)
}

/// RUST_LOG wins over the configured level; an unusable level falls back
/// to warnings only.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute_command(
    command: &Option<Commands>,
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(config.data_dir.value.clone());

    match command {
        Some(Commands::Pantry(cmd)) => {
            cmd.run(&store)?;
        }
        Some(Commands::Shopping(cmd)) => {
            cmd.run(&store, &config.user_id.value)?;
        }
        Some(Commands::Favorites(cmd)) => {
            if let Some(mut favorites) = notice(Favorites::load(store.clone()))? {
                cmd.run(&mut favorites, &store)?;
            }
        }
        Some(Commands::Recipe(cmd)) => {
            if let Some(favorites) = notice(Favorites::load(store.clone()))? {
                cmd.run(&favorites, &store, &config.api_url.value)?;
            }
        }
        Some(Commands::Plan(cmd)) => {
            cmd.run(&store, &config.user_id.value)?;
        }
        Some(Commands::Product(cmd)) => {
            cmd.run(&store, &config.api_url.value)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
