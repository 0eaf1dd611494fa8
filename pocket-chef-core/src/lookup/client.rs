//! HTTP client for the recipe/product API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use super::error::LookupError;
use crate::models::{Product, Recipe};

/// Timeout for a single lookup request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Checks that `barcode` is 8 to 14 ASCII digits (EAN-8 up to GTIN-14).
pub fn validate_barcode(barcode: &str) -> Result<&str, LookupError> {
    let code = barcode.trim();
    let valid = (8..=14).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(code)
    } else {
        Err(LookupError::InvalidBarcode(barcode.to_string()))
    }
}

/// Client for fetching recipes and products by id.
#[derive(Debug, Clone)]
pub struct LookupClient {
    base_url: String,
    http: reqwest::Client,
}

impl LookupClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches a recipe by id.
    pub async fn fetch_recipe(&self, id: &str) -> Result<Recipe, LookupError> {
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(LookupError::InvalidRecipeId(id.to_string()));
        }
        self.get_json(&format!("/recipes/{}", id)).await
    }

    /// Fetches a product by barcode. The barcode is validated first; an
    /// invalid one never reaches the network.
    pub async fn fetch_product(&self, barcode: &str) -> Result<Product, LookupError> {
        let code = validate_barcode(barcode)?;
        let mut product: Product = self.get_json(&format!("/products/{}", code)).await?;
        if product.barcode.is_empty() {
            product.barcode = code.to_string();
        }
        Ok(product)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LookupError> {
        let url = self.build_http_url(path);
        tracing::debug!(%url, "Lookup request");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Lookup failed");
            return Err(LookupError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(LookupError::EmptyResponse);
        }

        let value: Option<T> = serde_json::from_str(&body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;
        value.ok_or(LookupError::EmptyResponse)
    }

    fn build_http_url(&self, path: &str) -> String {
        let base_url = if self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
        {
            self.base_url.clone()
        } else {
            format!("http://{}", self.base_url)
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}
