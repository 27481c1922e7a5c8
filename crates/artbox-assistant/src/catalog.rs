//! Remote catalog access.

use std::time::Duration;

use artbox_catalog::Product;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::http;

/// Default catalog endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://68da41f623ebc87faa2f7a7a.mockapi.io/Art/art";

/// Default timeout for catalog requests.
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(15);

/// A read-only source of catalog products.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the whole catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch one product by identifier.
    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError>;
}

/// Catalog client over HTTP.
///
/// `GET {base_url}` returns the product array and `GET {base_url}/{id}` a
/// single product. Non-2xx responses become [`FetchError::Http`]. No retry.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a client for `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: http::client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for the default endpoint.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_CATALOG_URL, DEFAULT_CATALOG_TIMEOUT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        debug!(url = %self.base_url, "fetching catalog");
        let response = self.http.get(&self.base_url).send().await?;
        let products: Vec<Product> = http::read_json(response, &self.base_url).await?;
        info!(count = products.len(), "catalog fetched");
        Ok(products)
    }

    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError> {
        let url = format!("{}/{}", self.base_url, id);
        debug!(url = %url, "fetching product");
        let response = self.http.get(&url).send().await?;
        http::read_json(response, &url).await
    }
}
