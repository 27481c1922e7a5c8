//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use artbox_assistant::{
    Assistant, GeminiClient, GeminiConfig, HttpCatalogClient, TtlCache,
};
use artbox_store::{Favorites, FileStore};
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 3] = ["artbox.toml", ".artbox.toml", "artbox.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in effect, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        config.apply_env();
        debug!(config_path = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the favorites store.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.data_dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("artbox"),
        }
    }

    /// Favorites backed by the file store.
    pub fn favorites(&self) -> Result<Favorites<FileStore>> {
        let store = FileStore::open(self.data_dir()).context("Failed to open favorites store")?;
        Ok(Favorites::new(store))
    }

    /// Catalog client for the configured endpoint.
    pub fn catalog_client(&self) -> Result<HttpCatalogClient> {
        HttpCatalogClient::new(&self.config.catalog.url, self.config.catalog.timeout())
            .context("Failed to create catalog client")
    }

    /// Chat assistant; needs the API key in the environment.
    pub fn assistant(&self) -> Result<Assistant<HttpCatalogClient, GeminiClient>> {
        let settings = &self.config.assistant;
        let api_key = settings.api_key().ok_or_else(|| {
            anyhow!(
                "{} is not set. Export your Gemini API key to use chat.",
                settings.api_key_env
            )
        })?;

        let gemini = GeminiConfig::new(api_key)
            .with_api_url(&settings.api_url)
            .with_generation(settings.generation())
            .with_timeout(settings.timeout());
        let model = GeminiClient::new(gemini).context("Failed to create chat client")?;

        Ok(Assistant::with_cache(
            self.catalog_client()?,
            model,
            TtlCache::new(settings.cache_ttl()),
        ))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Ok(rest) = path.strip_prefix("~") {
            home_dir().join(rest)
        } else {
            self.cwd.join(path)
        }
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    home_dir().join(".local").join("share")
}
