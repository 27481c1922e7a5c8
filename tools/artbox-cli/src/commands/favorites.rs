//! Favorites commands.

use std::collections::HashSet;

use anyhow::{bail, Context as _, Result};
use artbox_assistant::CatalogSource;
use artbox_catalog::{Product, ProductId};
use artbox_store::{FavoriteSet, ToggleOutcome};
use dialoguer::Confirm;
use serde_json::json;

use super::{FavoritesArgs, FavoritesCommand};
use crate::context::Context;
use crate::output::{favorite_marker, product_table};

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(FavoritesCommand::List { search }) => list(search.as_deref(), ctx).await,
        None => list(None, ctx).await,
        Some(FavoritesCommand::Add { id }) => add(&id, ctx).await,
        Some(FavoritesCommand::Remove { ids }) => remove(&ids, ctx).await,
        Some(FavoritesCommand::Toggle { id }) => toggle(&id, ctx).await,
        Some(FavoritesCommand::Clear { yes }) => clear(yes, ctx).await,
    }
}

async fn list(search: Option<&str>, ctx: &Context) -> Result<()> {
    let set = FavoriteSet::load(ctx.favorites()?).await;
    let shown = set.search(search.unwrap_or_default());

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Favorites");
    if set.is_empty() {
        ctx.output.info("No favorites yet. Add one with `artbox favorites add <ID>`.");
        return Ok(());
    }
    if shown.is_empty() {
        ctx.output.info("No favorites match your search.");
        return Ok(());
    }

    product_table(&ctx.output, shown.iter().copied(), |_| favorite_marker(true));
    ctx.output.text("");
    ctx.output
        .info(&format!("Showing {} of {} favorite(s)", shown.len(), set.len()));
    Ok(())
}

async fn fetch_product(id: &str, ctx: &Context) -> Result<Product> {
    let client = ctx.catalog_client()?;
    let spinner = ctx.output.spinner("Loading art tool...");
    let product = client.fetch_product(id).await;
    spinner.finish_and_clear();
    product.with_context(|| format!("Failed to load art tool {}", id))
}

async fn add(id: &str, ctx: &Context) -> Result<()> {
    let favorites = ctx.favorites()?;
    if favorites.is_favorite(id).await {
        ctx.output.info(&format!("{} is already a favorite", id));
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "id": id, "added": false }));
        }
        return Ok(());
    }

    let product = fetch_product(id, ctx).await?;
    if !favorites.add_to_favorites(&product).await {
        bail!("Failed to add to favorites");
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "added": true }));
    } else {
        ctx.output
            .success(&format!("Added {} to favorites", product.name));
    }
    Ok(())
}

async fn remove(ids: &[String], ctx: &Context) -> Result<()> {
    let favorites = ctx.favorites()?;

    let ok = match ids {
        [single] => favorites.remove_from_favorites(single).await,
        many => {
            let set: HashSet<ProductId> = many.iter().map(|id| ProductId::from(id.as_str())).collect();
            favorites.remove_multiple_from_favorites(&set).await
        }
    };
    if !ok {
        bail!("Failed to remove from favorites");
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "removed": ids }));
    } else {
        ctx.output
            .success(&format!("Removed {} item(s) from favorites", ids.len()));
    }
    Ok(())
}

async fn toggle(id: &str, ctx: &Context) -> Result<()> {
    let mut set = FavoriteSet::load(ctx.favorites()?).await;

    // Removing needs only the stored snapshot; adding needs the catalog entry.
    let product = match set.products().iter().find(|p| p.id.as_str() == id) {
        Some(product) => product.clone(),
        None => fetch_product(id, ctx).await?,
    };

    let state = toggle_state(set.toggle(&product).await)?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": id, "result": state }));
    } else if state == "added" {
        ctx.output.success("Added to favorites");
    } else {
        ctx.output.success("Removed from favorites");
    }
    Ok(())
}

/// Result label for a toggle; a rejected change is an error.
fn toggle_state(outcome: ToggleOutcome) -> Result<&'static str> {
    match outcome {
        ToggleOutcome::Added => Ok("added"),
        ToggleOutcome::Removed => Ok("removed"),
        ToggleOutcome::Unchanged => bail!("Failed to update favorites. Please try again."),
    }
}

async fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut set = FavoriteSet::load(ctx.favorites()?).await;
    if set.is_empty() {
        ctx.output.info("No favorites to clear.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} favorite(s)?", set.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Clear cancelled.");
            return Ok(());
        }
    }

    if !set.clear().await {
        bail!("Failed to clear favorites");
    }
    ctx.output.success("Cleared all favorites");
    Ok(())
}
