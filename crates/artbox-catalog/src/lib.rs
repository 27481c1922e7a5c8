//! Art-supply catalog domain types and logic for artbox.
//!
//! This crate has no I/O. It provides:
//!
//! - **Product / Feedback**: catalog entries as served by the remote catalog,
//!   normalised on the way in (string booleans, numeric strings, missing arrays)
//! - **Reviews**: average rating, per-star distribution, feedback grouped by star
//! - **Search**: brand filter, text search, sorting and suggestions
//! - **Format**: display helpers for prices, deals, dates and star bars
//!
//! # Example
//!
//! ```rust,ignore
//! use artbox_catalog::prelude::*;
//!
//! let products = parse_catalog(bytes)?;
//! let query = CatalogQuery::new().with_text("brush").with_sort(SortOption::PriceAsc);
//! for product in query.apply(&products) {
//!     let summary = ReviewSummary::from_feedbacks(&product.feedbacks);
//!     println!("{} {} ({} reviews)", product.name, summary.display_average(), summary.total);
//! }
//! ```

pub mod error;
pub mod format;
pub mod ids;
pub mod normalize;
pub mod product;
pub mod reviews;
pub mod search;

pub use error::CatalogError;
pub use ids::ProductId;
pub use product::{find_product, parse_catalog, Feedback, Product};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::format::*;
    pub use crate::ids::ProductId;
    pub use crate::product::{find_product, parse_catalog, Feedback, Product};
    pub use crate::reviews::*;
    pub use crate::search::*;
}
