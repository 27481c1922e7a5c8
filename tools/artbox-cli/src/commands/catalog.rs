//! Catalog listing commands.

use anyhow::{Context as _, Result};
use artbox_assistant::CatalogSource;
use artbox_catalog::search::{brands, BrandFilter, CatalogQuery, SortOption};
use artbox_catalog::Product;
use futures::future::join;
use serde::Serialize;

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::context::Context;
use crate::output::{favorite_marker, product_table};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List(list)) => list_products(list, ctx).await,
        None => list_products(ListArgs::default(), ctx).await,
        Some(CatalogCommand::Brands) => list_brands(ctx).await,
    }
}

#[derive(Serialize)]
struct ListedProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    favorite: bool,
}

async fn fetch_catalog(ctx: &Context) -> Result<Vec<Product>> {
    let client = ctx.catalog_client()?;
    let spinner = ctx.output.spinner("Loading art tools...");
    let result = client.fetch_products().await;
    spinner.finish_and_clear();
    result.context("Failed to load art tools. Please try again.")
}

async fn list_products(args: ListArgs, ctx: &Context) -> Result<()> {
    let sort: SortOption = if args.sort.is_empty() {
        SortOption::default()
    } else {
        args.sort.parse()?
    };
    let query = CatalogQuery::new()
        .with_brand(BrandFilter::from_name(args.brand.as_deref()))
        .with_text(args.search.unwrap_or_default())
        .with_sort(sort);

    let favorites = ctx.favorites()?;
    // One favorites read for the whole listing, concurrent with the catalog fetch.
    let (products, favorite_ids) = join(fetch_catalog(ctx), favorites.favorite_ids()).await;
    let products = query.apply(&products?);

    if ctx.output.is_json() {
        let listed: Vec<ListedProduct<'_>> = products
            .iter()
            .map(|product| ListedProduct {
                product,
                favorite: favorite_ids.contains(&product.id),
            })
            .collect();
        ctx.output.json(&listed);
        return Ok(());
    }

    ctx.output.header(&format!("Art tools ({})", sort.display_name()));
    if products.is_empty() {
        ctx.output.info("No art tools match your filters.");
        return Ok(());
    }

    product_table(&ctx.output, &products, |p| {
        favorite_marker(favorite_ids.contains(&p.id))
    });
    ctx.output.text("");
    ctx.output
        .info(&format!("{} product(s), {} favorite(s)", products.len(), favorite_ids.len()));

    Ok(())
}

async fn list_brands(ctx: &Context) -> Result<()> {
    let products = fetch_catalog(ctx).await?;
    let mut names = vec!["All".to_string()];
    names.extend(brands(&products));

    if ctx.output.is_json() {
        ctx.output.json(&names);
        return Ok(());
    }

    ctx.output.header("Brands");
    for name in &names {
        ctx.output.list_item(name);
    }

    Ok(())
}
