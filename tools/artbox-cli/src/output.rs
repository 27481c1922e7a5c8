//! Output formatting for the CLI.

use artbox_catalog::format::{format_discount, format_price, format_price_fixed, truncate_text};
use artbox_catalog::Product;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Width of the distribution bars in `show`.
const BAR_WIDTH: usize = 20;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print plain text.
    pub fn text(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Column widths for product tables.
pub const PRODUCT_COLUMNS: [usize; 6] = [2, 6, 32, 14, 10, 9];

/// Header row for product tables.
pub const PRODUCT_HEADER: [&str; 6] = ["", "ID", "NAME", "BRAND", "PRICE", "DEAL"];

/// Cells for one product table row. `marker` is shown in the first column.
pub fn product_cells(product: &Product, marker: &str) -> [String; 6] {
    let deal = if product.has_deal() {
        style(format_discount(product.deal_fraction())).red().to_string()
    } else {
        String::new()
    };
    [
        marker.to_string(),
        product.id.to_string(),
        truncate_text(&product.name, 29),
        truncate_text(&product.brand, 14),
        format_price(product.price),
        deal,
    ]
}

/// Print a product table.
pub fn product_table<'a>(
    output: &Output,
    products: impl IntoIterator<Item = &'a Product>,
    marker: impl Fn(&Product) -> &'static str,
) {
    output.table_row(&PRODUCT_HEADER, &PRODUCT_COLUMNS);
    for product in products {
        let cells = product_cells(product, marker(product));
        let cols: Vec<&str> = cells.iter().map(String::as_str).collect();
        output.table_row(&cols, &PRODUCT_COLUMNS);
    }
}

/// Heart marker for favorited products.
pub fn favorite_marker(is_favorite: bool) -> &'static str {
    if is_favorite {
        "♥"
    } else {
        " "
    }
}

/// Price line with the pre-deal price struck through, e.g. `$20 $25.00 20% OFF`.
pub fn price_line(product: &Product) -> String {
    let price = style(format_price(product.price)).bold().to_string();
    match product.original_price() {
        Some(original) => format!(
            "{} {} {}",
            price,
            style(format_price_fixed(original)).dim().strikethrough(),
            style(format_discount(product.deal_fraction())).red()
        ),
        None => price,
    }
}

/// Horizontal bar for a percentage.
pub fn percentage_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!(
        "{}{}",
        "█".repeat(filled),
        style("░".repeat(BAR_WIDTH - filled)).dim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bar_width() {
        console::set_colors_enabled(false);
        assert_eq!(percentage_bar(0).chars().count(), BAR_WIDTH);
        assert_eq!(percentage_bar(100), "█".repeat(BAR_WIDTH));
        assert_eq!(percentage_bar(50).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_product_cells() {
        console::set_colors_enabled(false);
        let product = Product::new("7", "Sable Brush", "ArtPro", 25.0).with_deal(0.2);
        let cells = product_cells(&product, favorite_marker(true));
        assert_eq!(cells[0], "♥");
        assert_eq!(cells[1], "7");
        assert_eq!(cells[4], "$25");
        assert_eq!(cells[5], "20% OFF");
    }

    #[test]
    fn test_price_line_with_deal() {
        console::set_colors_enabled(false);
        let product = Product::new("7", "Sable Brush", "ArtPro", 20.0).with_deal(0.2);
        assert_eq!(price_line(&product), "$20 $25.00 20% OFF");
        let plain = Product::new("8", "Palette", "ArtPro", 18.5);
        assert_eq!(price_line(&plain), "$18.5");
    }
}
