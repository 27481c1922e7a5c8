//! Favorites against a real directory, across reopened stores.

use std::collections::HashSet;

use artbox_catalog::{parse_catalog, Product, ProductId};
use artbox_store::prelude::*;
use artbox_store::FAVORITES_KEY;

const CATALOG: &str = r#"[
    {"id": "1", "artName": "Sable Brush", "brand": "ArtPro", "price": "25.99",
     "glassSurface": "false", "limitedTimeDeal": 0.2,
     "feedbacks": [{"rating": 5, "author": "Ana", "comment": "Soft"}]},
    {"id": 2, "artName": "Glass Marker", "brand": "Inkline", "price": 7,
     "glassSurface": true, "feedbacks": null},
    {"id": "3", "artName": "Acrylic Set", "brand": "Colorama", "price": 42.5,
     "vendorSku": "AC-42"}
]"#;

fn catalog() -> Vec<Product> {
    parse_catalog(CATALOG.as_bytes()).unwrap()
}

#[tokio::test]
async fn test_favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let products = catalog();

    {
        let favorites = Favorites::new(FileStore::open(dir.path()).unwrap());
        for product in &products {
            assert!(favorites.add_to_favorites(product).await);
        }
        assert!(!favorites.add_to_favorites(&products[0]).await);
    }

    let favorites = Favorites::new(FileStore::open(dir.path()).unwrap());
    let stored = favorites.get_favorites().await;
    assert_eq!(stored, products);
    assert!(dir.path().join(format!("{FAVORITES_KEY}.json")).exists());

    // Unknown fields and coerced flags survive the round trip.
    assert_eq!(stored[2].extra["vendorSku"], "AC-42");
    assert!(!stored[0].glass_surface);
    assert!(stored[1].glass_surface);
}

#[tokio::test]
async fn test_batch_remove_then_clear() {
    let dir = tempfile::tempdir().unwrap();
    let favorites = Favorites::new(FileStore::open(dir.path()).unwrap());
    for product in &catalog() {
        favorites.add_to_favorites(product).await;
    }

    let remove: HashSet<ProductId> = ["1", "3"].into_iter().map(ProductId::from).collect();
    assert!(favorites.remove_multiple_from_favorites(&remove).await);
    let left: Vec<String> = favorites
        .get_favorites()
        .await
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(left, vec!["2"]);

    assert!(favorites.remove_from_favorites("not-there").await);
    assert!(favorites.is_favorite("2").await);

    assert!(favorites.clear_all_favorites().await);
    assert!(!favorites.is_favorite("2").await);
    assert!(!dir.path().join(format!("{FAVORITES_KEY}.json")).exists());
}

#[tokio::test]
async fn test_favorite_set_tracks_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let products = catalog();
    let mut set = FavoriteSet::load(Favorites::new(FileStore::open(dir.path()).unwrap())).await;
    assert!(set.is_empty());

    for product in &products {
        assert_eq!(set.toggle(product).await, ToggleOutcome::Added);
    }

    let mut selection = Selection::new();
    selection.toggle_all(set.search("a"));
    let selected = selection.ids().clone();
    assert!(set.remove_selected(&selected).await);

    let reopened = Favorites::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(&reopened.favorite_ids().await, set.ids());
}
