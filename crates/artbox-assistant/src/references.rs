//! Product references embedded in assistant replies.
//!
//! The model is asked to tag products as `[PRODUCT:ID:NAME:BRAND:PRICE]`.
//! Only the identifier is trusted: each tag is resolved against the catalog
//! snapshot and tags with unknown identifiers are dropped.

use std::sync::OnceLock;

use artbox_catalog::Product;
use regex::Regex;
use tracing::debug;

const PRODUCT_TAG: &str = r"\[PRODUCT:(\d+):([^:]+):([^:]+):([^:]+)\]";

fn product_tag() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PRODUCT_TAG).ok()).as_ref()
}

/// A tag as written by the model, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTag<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub brand: &'a str,
    pub price: &'a str,
}

/// Every well-formed tag in `text`, in order.
pub fn scan_tags(text: &str) -> Vec<ProductTag<'_>> {
    let Some(pattern) = product_tag() else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            Some(ProductTag {
                id: caps.get(1)?.as_str(),
                name: caps.get(2)?.as_str(),
                brand: caps.get(3)?.as_str(),
                price: caps.get(4)?.as_str(),
            })
        })
        .collect()
}

/// Products referenced in `text`, resolved by identifier.
///
/// One entry per tag in reply order, so a product tagged twice appears twice.
pub fn extract_product_references(text: &str, catalog: &[Product]) -> Vec<Product> {
    let mut products = Vec::new();
    for tag in scan_tags(text) {
        match catalog.iter().find(|p| p.id.as_str() == tag.id) {
            Some(product) => products.push(product.clone()),
            None => debug!(product_id = tag.id, "reply referenced unknown product"),
        }
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Sable Brush", "ArtPro", 25.99),
            Product::new("2", "Watercolor Palette", "ArtPro", 18.5),
            Product::new("abc", "Odd Id", "ArtPro", 1.0),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_scan_tags_captures_fields() {
        let tags = scan_tags("Try [PRODUCT:1:Sable Brush:ArtPro:$25.99] today");
        assert_eq!(
            tags,
            vec![ProductTag {
                id: "1",
                name: "Sable Brush",
                brand: "ArtPro",
                price: "$25.99",
            }]
        );
    }

    #[test]
    fn test_resolves_in_reply_order() {
        let reply = "[PRODUCT:2:Watercolor Palette:ArtPro:$18.50] and [PRODUCT:1:Sable Brush:ArtPro:$25.99]";
        assert_eq!(ids(&extract_product_references(reply, &catalog())), vec!["2", "1"]);
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let reply = "[PRODUCT:99:Ghost:Nobody:$1] [PRODUCT:1:Sable Brush:ArtPro:$25.99]";
        assert_eq!(ids(&extract_product_references(reply, &catalog())), vec!["1"]);
    }

    #[test]
    fn test_repeated_tags_resolve_each_time() {
        let reply = "[PRODUCT:1:A:B:$1] then [PRODUCT:2:C:D:$2] then [PRODUCT:1:A:B:$1]";
        assert_eq!(ids(&extract_product_references(reply, &catalog())), vec!["1", "2", "1"]);
    }

    #[test]
    fn test_malformed_tags_are_ignored() {
        let reply = "[PRODUCT:abc:Odd Id:ArtPro:$1] [PRODUCT:1:Missing Price] plain text";
        assert!(extract_product_references(reply, &catalog()).is_empty());
    }

    #[test]
    fn test_model_supplied_fields_are_not_trusted() {
        let reply = "[PRODUCT:1:Wrong Name:Wrong Brand:$0.01]";
        let products = extract_product_references(reply, &catalog());
        assert_eq!(products[0].name, "Sable Brush");
        assert_eq!(products[0].price, 25.99);
    }
}
