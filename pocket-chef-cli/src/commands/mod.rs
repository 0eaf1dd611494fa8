mod config_cmd;
mod favorites;
mod mealplan;
mod pantry;
mod product;
mod recipe;
mod shopping;

pub use config_cmd::ConfigCommand;
pub use favorites::FavoritesCommand;
pub use mealplan::PlanCommand;
pub use pantry::PantryCommand;
pub use product::ProductCommand;
pub use recipe::RecipeCommand;
pub use shopping::ShoppingCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use std::future::Future;
use std::io::{self, Write};

use pocket_chef_core::ChefError;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question on stdin. Anything but `y` is a no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Reports storage and not-found failures as a warning instead of an error.
///
/// Returns `Ok(None)` when the failure was reported; the command should
/// stop there without touching anything else.
pub fn notice<T, E: Into<ChefError>>(result: Result<T, E>) -> Result<Option<T>, ChefError> {
    match result.map_err(Into::into) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!(error = %e, "Command did not complete");
            eprintln!("warning: {}", e);
            if matches!(e, ChefError::Storage(_)) {
                eprintln!("Your data was left as it was. Try again once the problem is fixed.");
            }
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Runs a future on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, io::Error> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_chef_core::{StorageError, ValidationError};

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-01-14").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()
        );
        assert!(parse_date("14/01/2026").is_err());
    }

    #[test]
    fn test_notice_swallows_recoverable() {
        let not_found: Result<(), ChefError> = Err(ChefError::not_found("Recipe", "9"));
        assert!(notice(not_found).unwrap().is_none());

        let storage: Result<(), StorageError> =
            Err(StorageError::Unavailable("disk full".into()));
        assert!(notice(storage).unwrap().is_none());
    }

    #[test]
    fn test_notice_passes_validation_through() {
        let invalid: Result<(), ChefError> = Err(ValidationError::new(vec!["name"]).into());
        assert!(notice(invalid).is_err());
        assert_eq!(notice(Ok::<_, ChefError>(3)).unwrap(), Some(3));
    }
}
