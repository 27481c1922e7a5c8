//! In-memory view of the favorites collection kept in step with the store.

use std::collections::HashSet;

use artbox_catalog::search::matches_text;
use artbox_catalog::{Product, ProductId};
use tracing::{debug, warn};

use crate::{Favorites, KeyValueStore};

/// Result of [`FavoriteSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The store rejected the change; nothing moved.
    Unchanged,
}

/// Cached favorites plus the derived identifier set.
///
/// After every mutation the store confirms, the cache is rebuilt from one
/// fresh read so `ids()` always equals the persisted identifiers. If that
/// read fails the confirmed change is applied to the cache directly.
#[derive(Debug)]
pub struct FavoriteSet<S> {
    favorites: Favorites<S>,
    products: Vec<Product>,
    ids: HashSet<ProductId>,
}

impl<S: KeyValueStore> FavoriteSet<S> {
    /// Load the current collection. A failed read starts from empty.
    pub async fn load(favorites: Favorites<S>) -> Self {
        let products = favorites.get_favorites().await;
        let mut set = Self {
            favorites,
            products: Vec::new(),
            ids: HashSet::new(),
        };
        set.replace(products);
        set
    }

    /// Cached products in persisted order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Cached identifiers.
    pub fn ids(&self) -> &HashSet<ProductId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Membership test against the cache, no I/O.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// The wrapped persistence layer.
    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    /// Favorite the product if it is not one yet, otherwise unfavorite it.
    pub async fn toggle(&mut self, product: &Product) -> ToggleOutcome {
        if self.contains(product.id.as_str()) {
            if !self.favorites.remove_from_favorites(product.id.as_str()).await {
                return ToggleOutcome::Unchanged;
            }
            let id = product.id.clone();
            self.refresh(move |products| products.retain(|p| p.id != id))
                .await;
            ToggleOutcome::Removed
        } else {
            if !self.favorites.add_to_favorites(product).await {
                // Either a write fault or the store already had it; resync either way.
                self.refresh(|_| {}).await;
                return if self.contains(product.id.as_str()) {
                    ToggleOutcome::Added
                } else {
                    ToggleOutcome::Unchanged
                };
            }
            let added = product.clone();
            self.refresh(move |products| products.push(added)).await;
            ToggleOutcome::Added
        }
    }

    /// Remove every product in `ids` with a single store write.
    ///
    /// Returns `false` and leaves the cache untouched if the write failed.
    pub async fn remove_selected(&mut self, ids: &HashSet<ProductId>) -> bool {
        if ids.is_empty() {
            return true;
        }
        if !self.favorites.remove_multiple_from_favorites(ids).await {
            return false;
        }
        let ids = ids.clone();
        self.refresh(move |products| products.retain(|p| !ids.contains(&p.id)))
            .await;
        true
    }

    /// Delete the whole collection.
    pub async fn clear(&mut self) -> bool {
        if !self.favorites.clear_all_favorites().await {
            return false;
        }
        self.replace(Vec::new());
        true
    }

    /// Cached favorites whose name or brand contains `query`.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| matches_text(p, query))
            .collect()
    }

    /// Rebuild from the store; fall back to `apply` on the cache if the read fails.
    async fn refresh(&mut self, apply: impl FnOnce(&mut Vec<Product>)) {
        match self.favorites.try_get_favorites().await {
            Ok(products) => self.replace(products),
            Err(e) => {
                warn!(error = %e, "favorites re-read failed, patching cache locally");
                let mut products = std::mem::take(&mut self.products);
                apply(&mut products);
                self.replace(products);
            }
        }
    }

    fn replace(&mut self, products: Vec<Product>) {
        self.ids = products.iter().map(|p| p.id.clone()).collect();
        self.products = products;
        debug!(count = self.products.len(), "favorites cache rebuilt");
    }
}

/// Multi-select state for batch removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<ProductId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select or deselect one identifier.
    pub fn toggle(&mut self, id: &ProductId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    /// Replace the selection with the visible products, or clear it when it
    /// is already as large as the visible list. Selected products a search
    /// has hidden are dropped.
    pub fn toggle_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a Product>) {
        let visible: HashSet<ProductId> = visible.into_iter().map(|p| p.id.clone()).collect();
        if self.ids.len() == visible.len() {
            self.ids.clear();
        } else {
            self.ids = visible;
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &HashSet<ProductId> {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StoreError, FAVORITES_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn product(id: &str, name: &str, brand: &str) -> Product {
        Product::new(id, name, brand, 12.0)
    }

    fn ids_of(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    /// Store whose reads can be broken outright or after a number of reads.
    struct BlindStore {
        inner: MemoryStore,
        blind: AtomicBool,
        reads_left: AtomicUsize,
    }

    impl Default for BlindStore {
        fn default() -> Self {
            Self {
                inner: MemoryStore::new(),
                blind: AtomicBool::new(false),
                reads_left: AtomicUsize::new(usize::MAX),
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for BlindStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            let exhausted = self
                .reads_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err();
            if exhausted || self.blind.load(Ordering::SeqCst) {
                return Err(StoreError::StoreError("unreadable".into()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let mut set = FavoriteSet::load(Favorites::new(MemoryStore::new())).await;
        let brush = product("1", "Sable Brush", "ArtPro");

        assert_eq!(set.toggle(&brush).await, ToggleOutcome::Added);
        assert!(set.contains("1"));
        assert!(set.favorites().is_favorite("1").await);

        assert_eq!(set.toggle(&brush).await, ToggleOutcome::Removed);
        assert!(!set.contains("1"));
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn test_stale_cache_resyncs_on_toggle() {
        let favorites = Favorites::new(MemoryStore::new());
        let mut set = FavoriteSet::load(favorites).await;

        // Another writer adds the product behind the cache's back.
        let brush = product("1", "Sable Brush", "ArtPro");
        set.favorites().add_to_favorites(&brush).await;
        assert!(!set.contains("1"));

        assert_eq!(set.toggle(&brush).await, ToggleOutcome::Added);
        assert!(set.contains("1"));
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_selected_matches_store() {
        let mut set = FavoriteSet::load(Favorites::new(MemoryStore::new())).await;
        for id in ["a", "b", "c"] {
            set.toggle(&product(id, "Item", "ArtPro")).await;
        }

        let mut selection = Selection::new();
        selection.toggle(&ProductId::from("a"));
        selection.toggle(&ProductId::from("b"));
        assert!(set.remove_selected(selection.ids()).await);

        assert_eq!(ids_of(set.products()), vec!["c"]);
        let persisted = set.favorites().favorite_ids().await;
        assert_eq!(&persisted, set.ids());
    }

    #[tokio::test]
    async fn test_failed_reread_patches_cache_locally() {
        let mut set = FavoriteSet::load(Favorites::new(BlindStore::default())).await;
        set.toggle(&product("a", "Item", "ArtPro")).await;
        set.toggle(&product("b", "Item", "ArtPro")).await;

        // Allow the batch remove's own read, then fail the re-read.
        set.favorites().store().reads_left.store(1, Ordering::SeqCst);
        let remove: HashSet<ProductId> = [ProductId::from("a")].into_iter().collect();
        assert!(set.remove_selected(&remove).await);
        assert_eq!(ids_of(set.products()), vec!["b"]);
        assert!(!set.contains("a"));

        set.favorites().store().reads_left.store(usize::MAX, Ordering::SeqCst);
        assert_eq!(&set.favorites().favorite_ids().await, set.ids());
    }

    #[tokio::test]
    async fn test_failed_read_leaves_cache_untouched() {
        let mut set = FavoriteSet::load(Favorites::new(BlindStore::default())).await;
        set.toggle(&product("a", "Item", "ArtPro")).await;
        set.toggle(&product("b", "Item", "ArtPro")).await;

        set.favorites().store().blind.store(true, Ordering::SeqCst);
        let remove: HashSet<ProductId> = [ProductId::from("a")].into_iter().collect();
        // The batch remove reads first, so it fails and the cache must not move.
        assert!(!set.remove_selected(&remove).await);
        assert_eq!(ids_of(set.products()), vec!["a", "b"]);

        set.favorites().store().blind.store(false, Ordering::SeqCst);
        assert!(set.clear().await);
        assert!(set.is_empty());
        assert!(!set.favorites().store().inner.contains_key(FAVORITES_KEY).await);
    }

    #[tokio::test]
    async fn test_search_filters_cache() {
        let mut set = FavoriteSet::load(Favorites::new(MemoryStore::new())).await;
        set.toggle(&product("1", "Sable Brush", "ArtPro")).await;
        set.toggle(&product("2", "Glass Marker", "Inkline")).await;

        let hits: Vec<&str> = set.search("ink").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["2"]);
        assert_eq!(set.search("").len(), 2);
    }

    #[test]
    fn test_selection_toggle_all() {
        let visible = vec![product("1", "A", "X"), product("2", "B", "X")];
        let mut selection = Selection::new();

        selection.toggle(&ProductId::from("1"));
        selection.toggle_all(&visible);
        assert_eq!(selection.len(), 2);

        selection.toggle_all(&visible);
        assert!(selection.is_empty());

        selection.toggle(&ProductId::from("2"));
        selection.toggle(&ProductId::from("2"));
        assert!(!selection.contains("2"));
    }

    #[test]
    fn test_selection_toggle_all_drops_hidden_ids() {
        let visible = vec![product("1", "A", "X"), product("2", "B", "X")];
        let mut selection = Selection::new();
        selection.toggle(&ProductId::from("9"));

        selection.toggle_all(&visible);
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("1") && selection.contains("2"));
        assert!(!selection.contains("9"));
    }

    #[test]
    fn test_selection_toggle_all_compares_sizes() {
        let visible = vec![product("1", "A", "X"), product("2", "B", "X")];
        let mut selection = Selection::new();
        selection.toggle(&ProductId::from("1"));
        selection.toggle(&ProductId::from("9"));

        // Two selected and two visible counts as everything selected.
        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selection_toggle_all_with_nothing_visible() {
        let mut selection = Selection::new();
        selection.toggle(&ProductId::from("9"));
        selection.toggle_all(&Vec::<Product>::new());
        assert!(selection.is_empty());
    }
}
