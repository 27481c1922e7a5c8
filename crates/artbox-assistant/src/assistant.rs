//! Catalog-grounded chat assistant.

use std::sync::Arc;

use artbox_catalog::search::suggest;
use artbox_catalog::Product;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::cache::{TtlCache, DEFAULT_CACHE_TTL};
use crate::catalog::CatalogSource;
use crate::chat::ChatModel;
use crate::error::{AssistantError, FetchError};
use crate::prompt::{compose_prompt, system_prompt};
use crate::references::extract_product_references;

/// Opening line shown before the first user turn.
pub const GREETING: &str = "Hi! I'm your AI assistant for art tools. I can help you find products, compare brands, or answer questions about our art tools catalog. What would you like to know?";

/// One assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    /// Reply text as returned by the model, tags included.
    pub message: String,
    /// Catalog products the reply referenced.
    pub products: Vec<Product>,
}

/// Chat assistant over a catalog source and a chat model.
///
/// The catalog snapshot is cached for the cache's TTL; a failed fetch
/// leaves the previous entry in place and is returned to the caller.
#[derive(Debug)]
pub struct Assistant<C, M> {
    catalog: C,
    model: M,
    cache: TtlCache<Arc<Vec<Product>>>,
}

impl<C: CatalogSource, M: ChatModel> Assistant<C, M> {
    /// Assistant with the default cache TTL on the wall clock.
    pub fn new(catalog: C, model: M) -> Self {
        Self::with_cache(catalog, model, TtlCache::new(DEFAULT_CACHE_TTL))
    }

    /// Assistant with an explicit cache.
    pub fn with_cache(catalog: C, model: M, cache: TtlCache<Arc<Vec<Product>>>) -> Self {
        Self {
            catalog,
            model,
            cache,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn cache(&self) -> &TtlCache<Arc<Vec<Product>>> {
        &self.cache
    }

    /// Current catalog snapshot, from cache while fresh.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, FetchError> {
        if let Some(products) = self.cache.get().await {
            debug!(count = products.len(), "catalog served from cache");
            return Ok(products);
        }

        let products = match self.catalog.fetch_products().await {
            Ok(products) => Arc::new(products),
            Err(e) => {
                error!(error = %e, "failed to fetch products for assistant context");
                return Err(e);
            }
        };
        self.cache.put(products.clone()).await;
        Ok(products)
    }

    /// Send one user message and resolve the products the reply mentions.
    pub async fn send_message(&self, message: &str) -> Result<AssistantReply, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let products = self.products().await?;
        let prompt = compose_prompt(&system_prompt(&products), message);
        let reply = self.model.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "chat request failed");
            e
        })?;

        let referenced = extract_product_references(&reply, &products);
        info!(referenced = referenced.len(), "assistant replied");
        Ok(AssistantReply {
            message: reply,
            products: referenced,
        })
    }

    /// Up to five products whose name or brand contains `query`.
    ///
    /// Empty when the catalog cannot be fetched.
    pub async fn product_suggestions(&self, query: &str) -> Vec<Product> {
        match self.products().await {
            Ok(products) => suggest(&products, query),
            Err(e) => {
                error!(error = %e, "failed to get product suggestions");
                Vec::new()
            }
        }
    }
}
