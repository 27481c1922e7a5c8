//! Persisted favorites collection.

use std::collections::HashSet;

use artbox_catalog::{Product, ProductId};
use tracing::{debug, error};

use crate::{KeyValueStore, StoreError};

/// Store key holding the favorites collection.
pub const FAVORITES_KEY: &str = "favorite_art_tools";

/// The user's favorited products, persisted as one JSON array of full
/// product snapshots.
///
/// The collection never holds two products with the same identifier.
/// Mutations are read-modify-write with no locking: two concurrent mutations
/// race and the later write wins.
///
/// The plain methods (`get_favorites`, `add_to_favorites`, ...) never fail:
/// store errors are logged and reported as `false` or an empty list. The
/// `try_*` methods expose the underlying errors.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the collection. A missing key is an empty collection.
    pub async fn try_get_favorites(&self) -> Result<Vec<Product>, StoreError> {
        match self.store.get(FAVORITES_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a product unless one with the same identifier is already present.
    ///
    /// Returns `Ok(false)` without writing when it is a duplicate.
    pub async fn try_add(&self, product: &Product) -> Result<bool, StoreError> {
        let mut favorites = self.try_get_favorites().await?;
        if favorites.iter().any(|p| p.id == product.id) {
            return Ok(false);
        }
        favorites.push(product.clone());
        self.write(&favorites).await?;
        Ok(true)
    }

    /// Remove every entry with `id` and write the collection back.
    ///
    /// Writes even when nothing matched.
    pub async fn try_remove(&self, id: &str) -> Result<(), StoreError> {
        let mut favorites = self.try_get_favorites().await?;
        favorites.retain(|p| p.id.as_str() != id);
        self.write(&favorites).await
    }

    /// Remove every entry whose identifier is in `ids` with one read and one write.
    pub async fn try_remove_many(&self, ids: &HashSet<ProductId>) -> Result<(), StoreError> {
        let mut favorites = self.try_get_favorites().await?;
        let before = favorites.len();
        favorites.retain(|p| !ids.contains(&p.id));
        debug!(before, after = favorites.len(), "batch remove from favorites");
        self.write(&favorites).await
    }

    /// Delete the collection key.
    pub async fn try_clear(&self) -> Result<(), StoreError> {
        self.store.remove(FAVORITES_KEY).await
    }

    async fn write(&self, favorites: &[Product]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(favorites)?;
        self.store.set(FAVORITES_KEY, &raw).await
    }

    /// Read the collection, or an empty list if the read fails.
    pub async fn get_favorites(&self) -> Vec<Product> {
        self.try_get_favorites().await.unwrap_or_else(|e| {
            error!(error = %e, "failed to read favorites");
            Vec::new()
        })
    }

    /// Add a product. `false` if it was already a favorite or the write failed.
    pub async fn add_to_favorites(&self, product: &Product) -> bool {
        match self.try_add(product).await {
            Ok(added) => added,
            Err(e) => {
                error!(error = %e, product_id = %product.id, "failed to add to favorites");
                false
            }
        }
    }

    /// Remove a product by identifier.
    ///
    /// Returns `true` whenever the write succeeds, including when `id` was
    /// not a favorite.
    pub async fn remove_from_favorites(&self, id: &str) -> bool {
        match self.try_remove(id).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, product_id = id, "failed to remove from favorites");
                false
            }
        }
    }

    /// Remove several products in a single write.
    pub async fn remove_multiple_from_favorites(&self, ids: &HashSet<ProductId>) -> bool {
        match self.try_remove_many(ids).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, count = ids.len(), "failed to remove multiple from favorites");
                false
            }
        }
    }

    /// Delete the whole collection.
    pub async fn clear_all_favorites(&self) -> bool {
        match self.try_clear().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to clear favorites");
                false
            }
        }
    }

    /// Check membership by identifier. Reads the full collection.
    pub async fn is_favorite(&self, id: &str) -> bool {
        self.get_favorites().await.iter().any(|p| p.id.as_str() == id)
    }

    /// Identifiers of all favorites from a single read.
    ///
    /// Prefer this over calling [`Self::is_favorite`] once per product.
    pub async fn favorite_ids(&self) -> HashSet<ProductId> {
        self.get_favorites().await.into_iter().map(|p| p.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Store that counts writes and can be switched to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::StoreError("read fault".into()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::StoreError("write fault".into()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::StoreError("remove fault".into()));
            }
            self.inner.remove(key).await
        }
    }

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), "ArtPro", 10.0)
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_store_reads_empty() {
        let favorites = Favorites::new(MemoryStore::new());
        assert!(favorites.get_favorites().await.is_empty());
        assert!(!favorites.is_favorite("1").await);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let favorites = Favorites::new(MemoryStore::new());
        let p = product("1");

        assert!(favorites.add_to_favorites(&p).await);
        assert!(!favorites.add_to_favorites(&p).await);

        let stored = favorites.get_favorites().await;
        assert_eq!(stored, vec![p]);
    }

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let favorites = Favorites::new(MemoryStore::new());
        for id in ["3", "1", "2"] {
            assert!(favorites.add_to_favorites(&product(id)).await);
        }
        assert_eq!(ids(&favorites.get_favorites().await), vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_success_and_no_op() {
        let favorites = Favorites::new(MemoryStore::new());
        favorites.add_to_favorites(&product("1")).await;

        assert!(favorites.remove_from_favorites("42").await);
        assert_eq!(ids(&favorites.get_favorites().await), vec!["1"]);
    }

    #[tokio::test]
    async fn test_remove_multiple_single_write() {
        let store = FlakyStore::default();
        let favorites = Favorites::new(store);
        for id in ["a", "b", "c"] {
            favorites.add_to_favorites(&product(id)).await;
        }
        let writes_before = favorites.store().writes.load(Ordering::SeqCst);

        let remove: HashSet<ProductId> = ["a", "b"].into_iter().map(ProductId::from).collect();
        assert!(favorites.remove_multiple_from_favorites(&remove).await);

        assert_eq!(ids(&favorites.get_favorites().await), vec!["c"]);
        assert_eq!(favorites.store().writes.load(Ordering::SeqCst), writes_before + 1);
    }

    #[tokio::test]
    async fn test_clear_deletes_key() {
        let favorites = Favorites::new(MemoryStore::new());
        favorites.add_to_favorites(&product("1")).await;

        assert!(favorites.clear_all_favorites().await);
        assert!(!favorites.store().contains_key(FAVORITES_KEY).await);
        assert!(!favorites.is_favorite("1").await);
    }

    #[tokio::test]
    async fn test_write_failure_reports_false() {
        let favorites = Favorites::new(FlakyStore::default());
        favorites.store().fail_writes.store(true, Ordering::SeqCst);

        assert!(!favorites.add_to_favorites(&product("1")).await);
        assert!(!favorites.remove_from_favorites("1").await);
        assert!(!favorites.remove_multiple_from_favorites(&HashSet::new()).await);
        assert!(!favorites.clear_all_favorites().await);
    }

    #[tokio::test]
    async fn test_read_failure_is_swallowed_and_blocks_writes() {
        let favorites = Favorites::new(FlakyStore::default());
        favorites.add_to_favorites(&product("1")).await;
        favorites.store().fail_reads.store(true, Ordering::SeqCst);

        assert!(favorites.get_favorites().await.is_empty());
        assert!(!favorites.is_favorite("1").await);
        assert!(!favorites.add_to_favorites(&product("2")).await);
        assert!(favorites.try_get_favorites().await.is_err());

        favorites.store().fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(ids(&favorites.get_favorites().await), vec!["1"]);
    }

    #[tokio::test]
    async fn test_corrupt_payload_reads_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "not json").await.unwrap();
        let favorites = Favorites::new(store);

        assert!(favorites.get_favorites().await.is_empty());
        assert!(matches!(
            favorites.try_get_favorites().await,
            Err(StoreError::SerializeError(_))
        ));
        assert!(favorites.clear_all_favorites().await);
        assert!(favorites.add_to_favorites(&product("1")).await);
    }

    #[tokio::test]
    async fn test_favorite_ids_from_one_read() {
        let favorites = Favorites::new(MemoryStore::new());
        favorites.add_to_favorites(&product("1")).await;
        favorites.add_to_favorites(&product("2")).await;

        let set = favorites.favorite_ids().await;
        assert_eq!(set.len(), 2);
        assert!(set.contains("1") && set.contains("2"));
    }

    #[tokio::test]
    async fn test_persisted_layout_is_json_array_of_products() {
        let favorites = Favorites::new(MemoryStore::new());
        favorites
            .add_to_favorites(&product("7").with_glass_surface(true))
            .await;

        let raw = favorites.store().get(FAVORITES_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "7");
        assert_eq!(value[0]["artName"], "Product 7");
        assert_eq!(value[0]["glassSurface"], true);
    }
}
