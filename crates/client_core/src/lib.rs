//! Catalog service transport: a trait seam over HTTP so the fetch pipeline
//! can be exercised against mock services in tests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{domain::Product, error::ApiError};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog service address '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog service rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}

/// One query parameter per present filter bound, in the fixed field order
/// produced by `shared::filter::FilterBounds::to_query`.
pub type FilterQuery = Vec<(&'static str, String)>;

#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch_products(&self, query: &FilterQuery) -> Result<Vec<Product>, CatalogError>;
}

/// reqwest-backed catalog client bound to one service base address.
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let parsed = Url::parse(base_url).map_err(|err| CatalogError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!(
            "{}/products",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CatalogFetcher for CatalogClient {
    async fn fetch_products(&self, query: &FilterQuery) -> Result<Vec<Product>, CatalogError> {
        debug!(params = query.len(), "fetching catalog");
        let response = self
            .http
            .get(self.products_url())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the service's own error payload when it sends one.
            let message = match response.json::<ApiError>().await {
                Ok(api_error) => api_error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            };
            return Err(CatalogError::Rejected { status, message });
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|err| CatalogError::Decode(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
