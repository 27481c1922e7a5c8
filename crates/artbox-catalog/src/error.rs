//! Catalog error types.

use thiserror::Error;

/// Errors that can occur when working with catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found in the catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog payload could not be parsed.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unknown sort option name.
    #[error("Unknown sort option: {0} (expected one of: featured, price-asc, price-desc, name-asc, name-desc, rating, discount)")]
    InvalidSortOption(String),
}
