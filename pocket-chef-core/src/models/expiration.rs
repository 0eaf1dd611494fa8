//! Freshness classification for pantry items.
//!
//! The status is derived from the item's expiration date and "today"; it is
//! never stored.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Items expiring within this many days are flagged as a warning.
pub const WARNING_WINDOW_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Derived freshness of a pantry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationStatus {
    /// The item has no expiration date.
    NoDate,
    /// The expiration date could not be parsed.
    Invalid,
    /// Past its expiration date by `days_overdue` days.
    Expired { days_overdue: i64 },
    /// Expires within the warning window (0 means today).
    Warning { days_left: i64 },
    /// Expires after the warning window.
    Good { days_left: i64 },
}

impl ExpirationStatus {
    /// Returns true for statuses that deserve the user's attention.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            ExpirationStatus::Expired { .. } | ExpirationStatus::Warning { .. }
        )
    }

    /// Short label used when listing items.
    pub fn label(&self) -> &'static str {
        match self {
            ExpirationStatus::NoDate => "none",
            ExpirationStatus::Invalid => "invalid",
            ExpirationStatus::Expired { .. } => "expired",
            ExpirationStatus::Warning { .. } => "warning",
            ExpirationStatus::Good { .. } => "good",
        }
    }

    /// Message shown next to the item.
    pub fn message(&self) -> String {
        match self {
            ExpirationStatus::NoDate => String::new(),
            ExpirationStatus::Invalid => "Invalid date".to_string(),
            ExpirationStatus::Expired { days_overdue } => {
                format!("Expired! ({} days)", days_overdue)
            }
            ExpirationStatus::Warning { days_left: 0 } => "Expires today!".to_string(),
            ExpirationStatus::Warning { days_left } => {
                format!("Expiring soon! ({} days)", days_left)
            }
            ExpirationStatus::Good { .. } => "In good condition".to_string(),
        }
    }
}

impl fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Classifies an expiration date relative to `today`.
///
/// `diff = ceil((expiration - today) / 1 day)`. Negative is expired, 0..=7 is
/// a warning, anything later is good. Accepts `YYYY-MM-DD` dates and RFC 3339
/// timestamps; anything else is [`ExpirationStatus::Invalid`]. Never panics.
pub fn classify_expiration(expiration: Option<&str>, today: NaiveDate) -> ExpirationStatus {
    let raw = match expiration.map(str::trim) {
        None | Some("") => return ExpirationStatus::NoDate,
        Some(raw) => raw,
    };

    let diff_days = match days_until(raw, today) {
        Some(days) => days,
        None => return ExpirationStatus::Invalid,
    };

    if diff_days < 0 {
        ExpirationStatus::Expired {
            days_overdue: diff_days.abs(),
        }
    } else if diff_days <= WARNING_WINDOW_DAYS {
        ExpirationStatus::Warning {
            days_left: diff_days,
        }
    } else {
        ExpirationStatus::Good {
            days_left: diff_days,
        }
    }
}

/// Parses a stored expiration date.
pub fn parse_expiration_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
}

/// Formats an expiration date for display (e.g., "Jan 05, 2026").
pub fn format_expiration_date(raw: &str) -> String {
    match parse_expiration_date(raw) {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => "Invalid date".to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn days_until(raw: &str, today: NaiveDate) -> Option<i64> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some((date - today).num_days());
    }

    let expires_at = parse_timestamp(raw)?;
    let start_of_today = today.and_hms_opt(0, 0, 0)?.and_utc();
    let seconds = (expires_at - start_of_today).num_seconds();
    Some((seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY))
}
