//! CLI command implementations.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod favorites;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List(ListArgs),
    /// List brands in catalog order.
    Brands,
}

/// Filters for product listings.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Only show this brand ("All" for every brand).
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Case-insensitive text matched against name and brand.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: featured, price-asc, price-desc, name-asc, name-desc, rating, discount.
    #[arg(long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID.
    pub id: String,

    /// Show every review for this star value (repeatable).
    #[arg(short, long, value_name = "STAR", value_parser = clap::value_parser!(u8).range(1..=5))]
    pub expand: Vec<u8>,
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: Option<FavoritesCommand>,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorites.
    List {
        /// Case-insensitive text matched against name and brand.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a product to favorites.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove one or more products from favorites.
    Remove {
        /// Product IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Add the product if it is not a favorite, remove it otherwise.
    Toggle {
        /// Product ID.
        id: String,
    },
    /// Remove every favorite.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Message to send. Starts an interactive session when omitted.
    pub message: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
