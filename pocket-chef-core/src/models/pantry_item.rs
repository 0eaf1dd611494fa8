use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::draft::ValidDraft;
use super::expiration::{classify_expiration, ExpirationStatus};
use super::{format_quantity, Category};

/// Smallest quantity an item can be decremented to.
pub const MIN_QUANTITY: f64 = 1.0;

/// An ingredient the user owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Category,
    /// Set on creation and on every quantity change.
    pub last_updated: DateTime<Utc>,
    /// ISO date string, kept verbatim so that bad input can be reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

impl PantryItem {
    pub fn from_draft(id: impl Into<String>, draft: ValidDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            last_updated: now,
            expiration_date: draft.expiration_date,
        }
    }

    /// Applies `delta` to the quantity, never going below [`MIN_QUANTITY`].
    pub fn adjust_quantity(&mut self, delta: f64, now: DateTime<Utc>) {
        self.quantity = (self.quantity + delta).max(MIN_QUANTITY);
        self.last_updated = now;
    }

    pub fn expiration_status(&self, today: NaiveDate) -> ExpirationStatus {
        classify_expiration(self.expiration_date.as_deref(), today)
    }

    /// Case-insensitive substring match on the name.
    pub fn matches_search(&self, search: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&search.to_lowercase())
    }
}

impl fmt::Display for PantryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} ({})",
            self.name,
            format_quantity(self.quantity),
            self.unit,
            self.category
        )
    }
}
