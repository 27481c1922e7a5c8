//! CLI configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use artbox_assistant::{
    GenerationConfig, DEFAULT_CACHE_TTL, DEFAULT_CATALOG_TIMEOUT, DEFAULT_CATALOG_URL,
    DEFAULT_CHAT_TIMEOUT, DEFAULT_GEMINI_URL,
};
use serde::{Deserialize, Serialize};

/// Overrides the chat endpoint.
pub const API_URL_ENV: &str = "GEMINI_API_URL";

/// Overrides the catalog cache TTL, in milliseconds.
pub const CACHE_DURATION_ENV: &str = "CACHE_DURATION";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Remote catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Chat assistant.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Local persistence.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `GEMINI_API_URL` and `CACHE_DURATION` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.assistant.api_url = url;
        }
        if let Some(raw) = lookup(CACHE_DURATION_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.assistant.cache_ttl_override = Some(Duration::from_millis(ms)),
                _ => tracing::warn!(value = %raw, "ignoring invalid {CACHE_DURATION_ENV}"),
            }
        }
    }
}

/// Remote catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog endpoint returning the product array.
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_catalog_timeout() -> u64 {
    DEFAULT_CATALOG_TIMEOUT.as_secs()
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_secs: default_catalog_timeout(),
        }
    }
}

/// Chat assistant settings.
///
/// The API key is never stored in the file; it is read from the
/// environment variable named by `api_key_env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Catalog snapshot TTL in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Request timeout in seconds.
    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(skip)]
    cache_ttl_override: Option<Duration>,
}

fn default_api_url() -> String {
    DEFAULT_GEMINI_URL.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_chat_timeout() -> u64 {
    DEFAULT_CHAT_TIMEOUT.as_secs()
}

fn default_temperature() -> f32 {
    GenerationConfig::default().temperature
}

fn default_top_k() -> u32 {
    GenerationConfig::default().top_k
}

fn default_top_p() -> f32 {
    GenerationConfig::default().top_p
}

fn default_max_output_tokens() -> u32 {
    GenerationConfig::default().max_output_tokens
}

impl AssistantConfig {
    /// API key from the environment, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// Effective cache TTL; `CACHE_DURATION` wins over the file.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_override
            .unwrap_or_else(|| Duration::from_secs(self.cache_ttl_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            cache_ttl_secs: default_cache_ttl(),
            timeout_secs: default_chat_timeout(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            cache_ttl_override: None,
        }
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the favorites store (default: `~/.local/share/artbox`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Generate a default artbox.toml config file.
pub fn generate_default_config() -> String {
    let generation = GenerationConfig::default();
    format!(
        r#"# artbox configuration

[catalog]
url = "{catalog_url}"
timeout_secs = {catalog_timeout}

[assistant]
api_url = "{api_url}"
# The key itself is read from this environment variable.
api_key_env = "GEMINI_API_KEY"
cache_ttl_secs = {cache_ttl}
timeout_secs = {chat_timeout}
temperature = {temperature}
top_k = {top_k}
top_p = {top_p}
max_output_tokens = {max_tokens}

[storage]
# data_dir = "~/.local/share/artbox"
"#,
        catalog_url = DEFAULT_CATALOG_URL,
        catalog_timeout = DEFAULT_CATALOG_TIMEOUT.as_secs(),
        api_url = DEFAULT_GEMINI_URL,
        cache_ttl = DEFAULT_CACHE_TTL.as_secs(),
        chat_timeout = DEFAULT_CHAT_TIMEOUT.as_secs(),
        temperature = generation.temperature,
        top_k = generation.top_k,
        top_p = generation.top_p,
        max_tokens = generation.max_output_tokens,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.assistant.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.assistant.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.assistant.generation(), GenerationConfig::default());
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog.timeout_secs, DEFAULT_CATALOG_TIMEOUT.as_secs());
        assert_eq!(config.assistant.api_url, DEFAULT_GEMINI_URL);
        assert_eq!(config.assistant.top_k, 40);
        assert_eq!(config.assistant.max_output_tokens, 1024);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [assistant]
            temperature = 0.2

            [storage]
            data_dir = "/tmp/artbox"
            "#,
        )
        .unwrap();
        assert_eq!(config.assistant.temperature, 0.2);
        assert_eq!(config.assistant.top_p, 0.95);
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/artbox")));
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_URL_ENV, "http://localhost:9000/generate"),
            (CACHE_DURATION_ENV, "1500"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config.apply_env_with(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.assistant.api_url, "http://localhost:9000/generate");
        assert_eq!(config.assistant.cache_ttl(), Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_cache_duration_is_ignored() {
        let mut config = CliConfig::default();
        config.apply_env_with(|name| (name == CACHE_DURATION_ENV).then(|| "soon".to_string()));
        assert_eq!(config.assistant.cache_ttl(), DEFAULT_CACHE_TTL);
    }

    #[test]
    fn test_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("artbox.toml");
        std::fs::write(&toml_path, "[catalog]\ntimeout_secs = 3\n").unwrap();
        let config = CliConfig::load(toml_path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.timeout(), Duration::from_secs(3));

        let json_path = dir.path().join("artbox.json");
        std::fs::write(&json_path, r#"{"assistant": {"top_k": 8}}"#).unwrap();
        let config = CliConfig::load(json_path.to_str().unwrap()).unwrap();
        assert_eq!(config.assistant.top_k, 8);

        assert!(CliConfig::load(dir.path().join("missing.toml").to_str().unwrap()).is_err());
    }
}
