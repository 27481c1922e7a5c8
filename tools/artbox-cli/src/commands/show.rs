//! Product detail command.

use anyhow::{Context as _, Result};
use artbox_assistant::CatalogSource;
use artbox_catalog::format::{format_date, star_bar};
use artbox_catalog::reviews::{group_by_rating, RatingGroup, ReviewSummary};
use artbox_catalog::{Feedback, Product};
use futures::future::join;
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{percentage_bar, price_line};

#[derive(Serialize)]
struct ProductDetail<'a> {
    product: &'a Product,
    favorite: bool,
    reviews: ReviewSummary,
    groups: Vec<GroupDetail<'a>>,
}

#[derive(Serialize)]
struct GroupDetail<'a> {
    star: u8,
    count: usize,
    shown: &'a [&'a Feedback],
    hidden: usize,
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let client = ctx.catalog_client()?;
    let favorites = ctx.favorites()?;

    let spinner = ctx.output.spinner("Loading...");
    let (product, favorite) = join(
        client.fetch_product(&args.id),
        favorites.is_favorite(&args.id),
    )
    .await;
    spinner.finish_and_clear();
    let product = product.with_context(|| format!("Failed to load art tool {}", args.id))?;

    let summary = ReviewSummary::from_feedbacks(&product.feedbacks);
    let groups = group_by_rating(&product.feedbacks);
    let expanded = |star: u8| args.expand.contains(&star);

    if ctx.output.is_json() {
        let groups = groups
            .values()
            .rev()
            .map(|group| GroupDetail {
                star: group.star,
                count: group.len(),
                shown: group.visible(expanded(group.star)),
                hidden: if expanded(group.star) { 0 } else { group.hidden_count() },
            })
            .collect();
        ctx.output.json(&ProductDetail {
            product: &product,
            favorite,
            reviews: summary,
            groups,
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("Brand", &product.brand);
    ctx.output.kv("Price", &price_line(&product));
    ctx.output.kv(
        "Surface",
        if product.glass_surface {
            "Suitable for glass surfaces"
        } else {
            "Regular surface application"
        },
    );
    ctx.output.kv("Favorite", if favorite { "♥ yes" } else { "no" });

    if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        ctx.output.header("Description");
        ctx.output.text(description);
    }

    if !product.has_feedback() {
        return Ok(());
    }

    ctx.output.header("Customer Reviews");
    ctx.output.text(&format!(
        "{} {}  Based on {} reviews",
        summary.display_average(),
        star_bar(summary.rounded_stars()),
        summary.total
    ));

    ctx.output.text("");
    ctx.output.text("Rating Breakdown");
    for bucket in &summary.distribution {
        ctx.output.text(&format!(
            "  {} ★ {} {:>3}% ({})",
            bucket.star,
            percentage_bar(bucket.percentage),
            bucket.percentage,
            bucket.count
        ));
    }

    for group in groups.values().rev() {
        print_group(ctx, group, expanded(group.star));
    }

    Ok(())
}

fn print_group(ctx: &Context, group: &RatingGroup<'_>, expanded: bool) {
    let plural = if group.len() == 1 { "" } else { "s" };
    ctx.output.text("");
    ctx.output.text(&format!(
        "{}  {} review{}",
        star_bar(group.star),
        group.len(),
        plural
    ));

    for feedback in group.visible(expanded) {
        let date = feedback.date.as_ref().map(format_date).unwrap_or_default();
        ctx.output.text(&format!("  {}  {}", feedback.author, date));
        if !feedback.comment.is_empty() {
            ctx.output.text(&format!("    {}", feedback.comment));
        }
    }

    if group.is_expandable() && !expanded {
        ctx.output.text(&format!(
            "  +{} more reviews (--expand {})",
            group.hidden_count(),
            group.star
        ));
    }
}
