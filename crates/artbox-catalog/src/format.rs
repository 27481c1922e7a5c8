//! Display helpers for catalog values.

use chrono::{DateTime, Local, Utc};

/// Format a price the way the catalog shows it: `$25.99`, `$25`.
pub fn format_price(price: f64) -> String {
    format!("${}", price)
}

/// Format a price with two decimals: `$25.00`.
pub fn format_price_fixed(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format a deal fraction as a badge: `0.25` becomes `25% OFF`.
pub fn format_discount(deal: f64) -> String {
    format!("{}% OFF", (deal * 100.0).round() as i64)
}

/// Format a review date in the local timezone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

/// Truncate text to `max_len` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_len).collect();
    truncated.push_str("...");
    truncated
}

/// Render a five-star bar with `filled` stars.
pub fn star_bar(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
