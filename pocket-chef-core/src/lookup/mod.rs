//! Recipe and product lookups.
//!
//! [`LookupClient`] talks to the recipe/product HTTP API:
//!
//! - `GET {base}/recipes/{id}` returns a recipe
//! - `GET {base}/products/{barcode}` returns a product
//!
//! Barcodes come from a [`BarcodeScanner`]; the camera is outside this
//! crate, so anything that can produce a barcode string can stand in.

mod client;
mod error;
mod scanner;

pub use client::{validate_barcode, LookupClient, REQUEST_TIMEOUT};
pub use error::{LookupError, ScanError};
pub use scanner::{BarcodeScanner, ReaderScanner};
