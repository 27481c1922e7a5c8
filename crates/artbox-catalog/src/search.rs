//! Catalog search: brand filter, text search and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::product::Product;
use crate::reviews::average_rating;

/// Maximum number of suggestions returned by [`suggest`].
pub const SUGGESTION_LIMIT: usize = 5;

/// Brand filter for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrandFilter {
    /// No brand restriction.
    #[default]
    All,
    /// Exact brand name.
    Brand(String),
}

impl BrandFilter {
    /// Build from an optional brand name; `"All"` means no restriction.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None | Some("All") => BrandFilter::All,
            Some(brand) => BrandFilter::Brand(brand.to_string()),
        }
    }

    /// Check if a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Brand(brand) => product.brand == *brand,
        }
    }
}

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by highest average rating.
    Rating,
    /// Sort by biggest limited-time deal.
    Discount,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::Rating => "rating",
            SortOption::Discount => "discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Rating => "Highest Rated",
            SortOption::Discount => "Biggest Deal",
        }
    }

    /// Compare two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceAsc => a.price.total_cmp(&b.price),
            SortOption::PriceDesc => b.price.total_cmp(&a.price),
            SortOption::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortOption::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            SortOption::Rating => {
                average_rating(&b.feedbacks).total_cmp(&average_rating(&a.feedbacks))
            }
            SortOption::Discount => b.deal_fraction().total_cmp(&a.deal_fraction()),
        }
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "featured" => Ok(SortOption::Featured),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "name-asc" => Ok(SortOption::NameAsc),
            "name-desc" => Ok(SortOption::NameDesc),
            "rating" => Ok(SortOption::Rating),
            "discount" => Ok(SortOption::Discount),
            _ => Err(CatalogError::InvalidSortOption(s.to_string())),
        }
    }
}

/// Case-insensitive substring match on name or brand.
///
/// A blank query matches everything.
pub fn matches_text(product: &Product, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle) || product.brand.to_lowercase().contains(&needle)
}

/// A catalog listing query.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogQuery {
    /// Text query matched against name and brand.
    pub text: Option<String>,
    /// Brand restriction.
    pub brand: BrandFilter,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create a query that matches everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.text = if q.trim().is_empty() { None } else { Some(q) };
        self
    }

    /// Set the brand filter.
    pub fn with_brand(mut self, brand: BrandFilter) -> Self {
        self.brand = brand;
        self
    }

    /// Set the sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a product passes the brand filter and text query.
    pub fn matches(&self, product: &Product) -> bool {
        self.brand.matches(product)
            && self
                .text
                .as_deref()
                .map_or(true, |q| matches_text(product, q))
    }

    /// Filter and sort a catalog snapshot. The sort is stable.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut results: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        results.sort_by(|a, b| self.sort.compare(a, b));
        results
    }
}

/// Unique brands in the order they first appear.
pub fn brands(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.brand) {
            seen.push(product.brand.clone());
        }
    }
    seen
}

/// Products whose name or brand contains the query, capped at [`SUGGESTION_LIMIT`].
pub fn suggest(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.brand.to_lowercase().contains(&needle)
        })
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}
