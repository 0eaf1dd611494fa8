use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::{Config, ConfigValue};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                config_path
                                    .unwrap_or_else(Config::default_config_path)
                                    .display()
                            );
                        }
                        println!();

                        let data_dir = ConfigValue::new(
                            config.data_dir.value.display().to_string(),
                            config.data_dir.source.clone(),
                        );
                        print_value("data_dir", &data_dir);
                        print_value("api_url", &config.api_url);
                        print_value("user_id", &config.user_id);
                        print_value("log_level", &config.log_level);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = config_path.unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'chef config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let default_config = r#"# pocket-chef configuration

# Directory for pantry, shopping list, favorites, meal plan and recipe data
# (default: ~/.local/share/pocket-chef). Relative paths are resolved
# against this file's directory.
# data_dir: data

# Recipe/product API
api_url: http://localhost:8080

# Owner recorded on new meal plans
user_id: default

# Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
log_level: warn
"#;

                let mut file = fs::File::create(&config_path)?;
                file.write_all(default_config.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

fn print_value(name: &str, value: &ConfigValue<String>) {
    println!("{}: {}", name, value.value);
    println!("  source: {}", value.source);
    println!();
}
