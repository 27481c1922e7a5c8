//! Product and feedback types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::normalize;

/// An art-supply product from the remote catalog.
///
/// The same shape is used for persisted favorites, which store full product
/// snapshots. Fields this type does not model are kept in `extra` so a
/// snapshot round-trips the catalog object it was taken from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    #[serde(deserialize_with = "normalize::product_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "artName", default, deserialize_with = "normalize::text")]
    pub name: String,
    /// Brand name.
    #[serde(default, deserialize_with = "normalize::text")]
    pub brand: String,
    /// Current price (after any deal).
    #[serde(
        default,
        deserialize_with = "normalize::price",
        serialize_with = "normalize::serialize_number"
    )]
    pub price: f64,
    /// Limited-time deal as a fraction in `[0, 1)`.
    #[serde(
        rename = "limitedTimeDeal",
        default,
        deserialize_with = "normalize::optional_number",
        serialize_with = "normalize::serialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub deal: Option<f64>,
    /// Whether the product is suitable for glass surfaces.
    #[serde(
        rename = "glassSurface",
        default,
        deserialize_with = "normalize::flexible_bool"
    )]
    pub glass_surface: bool,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Customer feedback, in catalog order.
    #[serde(default, deserialize_with = "normalize::feedbacks")]
    pub feedbacks: Vec<Feedback>,
    /// Catalog fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with the required catalog fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            price: price.max(0.0),
            deal: None,
            glass_surface: false,
            image: None,
            description: None,
            feedbacks: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set the limited-time deal fraction.
    pub fn with_deal(mut self, deal: f64) -> Self {
        self.deal = Some(deal);
        self
    }

    /// Mark the product as suitable for glass surfaces.
    pub fn with_glass_surface(mut self, glass_surface: bool) -> Self {
        self.glass_surface = glass_surface;
        self
    }

    /// Attach feedback entries.
    pub fn with_feedbacks(mut self, feedbacks: Vec<Feedback>) -> Self {
        self.feedbacks = feedbacks;
        self
    }

    /// Check if a limited-time deal applies.
    pub fn has_deal(&self) -> bool {
        self.deal.is_some_and(|d| d > 0.0)
    }

    /// Deal fraction, or zero when there is none.
    pub fn deal_fraction(&self) -> f64 {
        self.deal.filter(|d| *d > 0.0).unwrap_or(0.0)
    }

    /// Price before the deal was applied.
    ///
    /// Returns `None` when there is no deal or the fraction is outside `(0, 1)`.
    pub fn original_price(&self) -> Option<f64> {
        match self.deal {
            Some(d) if d > 0.0 && d < 1.0 => Some(self.price / (1.0 - d)),
            _ => None,
        }
    }

    /// Check if the product has any feedback.
    pub fn has_feedback(&self) -> bool {
        !self.feedbacks.is_empty()
    }
}

/// A single customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    /// Review author.
    #[serde(default, deserialize_with = "normalize::text")]
    pub author: String,
    /// Rating as served. Expected to be an integer in `1..=5`.
    #[serde(
        default,
        deserialize_with = "normalize::rating",
        serialize_with = "normalize::serialize_number"
    )]
    pub rating: f64,
    /// Review text.
    #[serde(default, deserialize_with = "normalize::text")]
    pub comment: String,
    /// When the review was written.
    #[serde(
        default,
        deserialize_with = "normalize::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

impl Feedback {
    /// Create a feedback entry.
    pub fn new(author: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            rating: f64::from(rating),
            comment: comment.into(),
            date: None,
        }
    }

    /// Set the review date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// The star bucket this review belongs to.
    ///
    /// `None` for ratings that are not an integer in `1..=5`.
    pub fn star(&self) -> Option<u8> {
        if self.rating.fract() == 0.0 && (1.0..=5.0).contains(&self.rating) {
            Some(self.rating as u8)
        } else {
            None
        }
    }
}

/// Parse a catalog payload (a JSON array of products).
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Look up a product by identifier in a catalog snapshot.
pub fn find_product<'a>(products: &'a [Product], id: &str) -> Result<&'a Product, CatalogError> {
    products
        .iter()
        .find(|p| p.id.as_str() == id)
        .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
}
