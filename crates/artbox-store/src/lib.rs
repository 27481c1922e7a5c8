//! Key-value persistence and favorites for artbox.
//!
//! Favorites are stored as one JSON array of full product snapshots under a
//! fixed key. Every favorites operation swallows store failures and reports
//! them as `false` or an empty list, so UI code never sees a store error.
//!
//! # Example
//!
//! ```rust,ignore
//! use artbox_store::prelude::*;
//!
//! let favorites = Favorites::new(FileStore::open("~/.local/share/artbox")?);
//!
//! if favorites.add_to_favorites(&product).await {
//!     println!("Added to favorites");
//! }
//!
//! // One read for a whole listing instead of one per product
//! let ids = favorites.favorite_ids().await;
//! ```

mod error;
mod favorites;
mod kv;
mod reconcile;

pub use error::StoreError;
pub use favorites::{Favorites, FAVORITES_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use reconcile::{FavoriteSet, Selection, ToggleOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FavoriteSet, Favorites, FileStore, KeyValueStore, MemoryStore, Selection, StoreError,
        ToggleOutcome,
    };
}
