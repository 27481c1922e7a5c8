//! Prompt construction.

use artbox_catalog::format::format_price;
use artbox_catalog::Product;

const PREAMBLE: &str = "You are an AI assistant for an art tools e-commerce app. You can ONLY discuss products from this specific catalog. Here are the available products:";

const RULES: &str = r#"IMPORTANT RULES:
1. ONLY talk about products from the above list
2. When mentioning products, always include their ID, name, brand, and price
3. If user asks about brands, products, or recommendations, provide relevant products from the catalog
4. If you mention specific products, format them as: [PRODUCT:ID:NAME:BRAND:PRICE] so the app can display them as clickable items
5. Be helpful but stay within the product catalog scope
6. If asked about products not in the catalog, politely explain you can only discuss the available art tools

Example response format:
"Here are some great art tools from [BRAND]: [PRODUCT:1:Professional Brush Set:ArtPro:$25.99] and [PRODUCT:2:Watercolor Palette:ArtPro:$18.50]. These are excellent choices for your art projects.""#;

/// One catalog line, e.g.
/// `ID: 1, Name: Sable Brush, Brand: ArtPro, Price: $25.99, Glass Surface: false, Limited Time Deal: 20%`.
pub fn product_line(product: &Product) -> String {
    format!(
        "ID: {}, Name: {}, Brand: {}, Price: {}, Glass Surface: {}, Limited Time Deal: {}%",
        product.id,
        product.name,
        product.brand,
        format_price(product.price),
        product.glass_surface,
        (product.deal_fraction() * 100.0).round() as i64,
    )
}

/// System prompt restricting the model to `products`.
pub fn system_prompt(products: &[Product]) -> String {
    let catalog = products
        .iter()
        .map(product_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{PREAMBLE}\n\n{catalog}\n\n{RULES}")
}

/// Full prompt for one user turn.
pub fn compose_prompt(system_prompt: &str, user_message: &str) -> String {
    format!("{system_prompt}\n\nUser question: {user_message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_line() {
        let product = Product::new("1", "Sable Brush", "ArtPro", 25.99)
            .with_deal(0.2)
            .with_glass_surface(true);
        assert_eq!(
            product_line(&product),
            "ID: 1, Name: Sable Brush, Brand: ArtPro, Price: $25.99, Glass Surface: true, Limited Time Deal: 20%"
        );
    }

    #[test]
    fn test_product_line_without_deal() {
        let product = Product::new("2", "Palette", "ArtPro", 18.0);
        assert!(product_line(&product).ends_with("Glass Surface: false, Limited Time Deal: 0%"));
    }

    #[test]
    fn test_system_prompt_lists_every_product_then_rules() {
        let products = vec![
            Product::new("1", "Sable Brush", "ArtPro", 25.99),
            Product::new("2", "Glass Marker", "Inkline", 7.0),
        ];
        let prompt = system_prompt(&products);

        let brush = prompt.find("ID: 1, Name: Sable Brush").unwrap();
        let marker = prompt.find("ID: 2, Name: Glass Marker").unwrap();
        let rules = prompt.find("IMPORTANT RULES:").unwrap();
        assert!(prompt.starts_with(PREAMBLE));
        assert!(brush < marker && marker < rules);
        assert!(prompt.contains("[PRODUCT:ID:NAME:BRAND:PRICE]"));
    }

    #[test]
    fn test_compose_prompt() {
        assert_eq!(compose_prompt("SYS", "hi"), "SYS\n\nUser question: hi");
    }
}
