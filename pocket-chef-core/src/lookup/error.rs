//! Lookup and scan error types.

use std::io;

use thiserror::Error;

/// Errors that can occur while fetching a recipe or a product.
#[derive(Debug)]
pub enum LookupError {
    /// The barcode is not 8 to 14 digits
    InvalidBarcode(String),
    /// The recipe id is empty or not usable in a URL
    InvalidRecipeId(String),
    /// Failed to reach the server
    Request(String),
    /// The server answered with a non-success status
    Http(u16),
    /// The server answered with an empty body or `null`
    EmptyResponse,
    /// The body is not the expected JSON shape
    InvalidResponse(String),
}

impl LookupError {
    /// True if the server reported that the thing does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::Http(404) | LookupError::EmptyResponse)
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::InvalidBarcode(code) => {
                write!(f, "Invalid barcode '{}': expected 8 to 14 digits", code)
            }
            LookupError::InvalidRecipeId(id) => write!(f, "Invalid recipe id '{}'", id),
            LookupError::Request(e) => write!(f, "Request failed: {}", e),
            LookupError::Http(status) => write!(f, "Server returned status {}", status),
            LookupError::EmptyResponse => write!(f, "Server returned no data"),
            LookupError::InvalidResponse(e) => write!(f, "Unexpected response: {}", e),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Request(e.to_string())
    }
}

/// Errors a barcode scanner can report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The user gave up without scanning anything.
    #[error("Scan cancelled")]
    Cancelled,

    #[error("Scanner I/O error: {0}")]
    Io(#[from] io::Error),

    /// Something was read, but it is not a barcode.
    #[error("Not a barcode: '{0}'")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_display() {
        assert_eq!(
            LookupError::Http(503).to_string(),
            "Server returned status 503"
        );
        assert_eq!(
            LookupError::InvalidBarcode("12".into()).to_string(),
            "Invalid barcode '12': expected 8 to 14 digits"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(LookupError::Http(404).is_not_found());
        assert!(LookupError::EmptyResponse.is_not_found());
        assert!(!LookupError::Http(500).is_not_found());
    }
}
