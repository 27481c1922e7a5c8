//! Remote catalog client and catalog-grounded chat assistant for artbox.
//!
//! This crate provides:
//! - `CatalogSource` / `HttpCatalogClient` - the read-only product catalog
//! - `ChatModel` / `GeminiClient` - prompt in, free text out
//! - `TtlCache` - one catalog snapshot with an injected `Clock`
//! - `Assistant` - composes the above, builds the prompt and resolves
//!   `[PRODUCT:...]` references in replies
//!
//! Network failures propagate as [`FetchError`]; nothing here retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use artbox_assistant::prelude::*;
//!
//! let catalog = HttpCatalogClient::with_defaults()?;
//! let model = GeminiClient::new(GeminiConfig::new(api_key))?;
//! let assistant = Assistant::new(catalog, model);
//!
//! let reply = assistant.send_message("Any brushes on sale?").await?;
//! for product in &reply.products {
//!     println!("{} ({})", product.name, product.brand);
//! }
//! ```

mod assistant;
mod cache;
mod catalog;
mod chat;
mod error;
mod http;
pub mod prompt;
pub mod references;

pub use assistant::{Assistant, AssistantReply, GREETING};
pub use cache::{Clock, ManualClock, SystemClock, TtlCache, DEFAULT_CACHE_TTL};
pub use catalog::{CatalogSource, HttpCatalogClient, DEFAULT_CATALOG_TIMEOUT, DEFAULT_CATALOG_URL};
pub use chat::{
    ChatModel, GeminiClient, GeminiConfig, GenerateResponse, GenerationConfig, DEFAULT_CHAT_TIMEOUT,
    DEFAULT_GEMINI_URL,
};
pub use error::{AssistantError, FetchError};
pub use references::extract_product_references;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Assistant, AssistantError, AssistantReply, CatalogSource, ChatModel, FetchError,
        GeminiClient, GeminiConfig, HttpCatalogClient, TtlCache,
    };
}
