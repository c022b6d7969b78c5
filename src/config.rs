//! Configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Bridge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub api_port: u16,

    /// Base origin of the Ollama-compatible runtime
    pub runtime_url: String,

    /// Web origin of the public model library
    pub library_origin: String,

    /// Freshness window for the cached catalog
    pub catalog_cache_ttl_secs: u64,

    /// Entry limit for the cached catalog endpoint
    pub catalog_page_limit: usize,

    /// Entry limit for the uncached scrape backing enrichment
    pub enrichment_scrape_limit: usize,

    /// Largest parameter count (billions) the target GPU can run
    pub suitability_threshold_b: f64,

    /// Timeout applied to every outbound HTTP call
    pub request_timeout_secs: u64,

    /// Model-family name -> parameter-size string, consulted ahead of
    /// description-text matching during scraping
    pub known_param_sizes: HashMap<String, String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            runtime_url: default_runtime_url(),
            library_origin: default_library_origin(),
            catalog_cache_ttl_secs: default_catalog_cache_ttl(),
            catalog_page_limit: default_catalog_page_limit(),
            enrichment_scrape_limit: default_enrichment_scrape_limit(),
            suitability_threshold_b: default_suitability_threshold(),
            request_timeout_secs: default_request_timeout(),
            known_param_sizes: default_known_param_sizes(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content).context("Failed to parse TOML config")?
        } else {
            Self::default()
        };

        // Environment variable overrides
        if let Ok(port) = std::env::var("OLLAMA_BRIDGE_API_PORT") {
            config.api_port = port
                .parse()
                .context("Invalid OLLAMA_BRIDGE_API_PORT value")?;
        }
        if let Ok(url) = std::env::var("OLLAMA_BRIDGE_RUNTIME_URL") {
            config.runtime_url = url;
        }
        if let Ok(origin) = std::env::var("OLLAMA_BRIDGE_LIBRARY_ORIGIN") {
            config.library_origin = origin;
        }
        if let Ok(ttl) = std::env::var("OLLAMA_BRIDGE_CACHE_TTL_SECS") {
            config.catalog_cache_ttl_secs = ttl
                .parse()
                .context("Invalid OLLAMA_BRIDGE_CACHE_TTL_SECS value")?;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_port < 1024 {
            anyhow::bail!("API port must be >= 1024 (got {})", self.api_port);
        }

        for (label, value) in [
            ("runtime_url", &self.runtime_url),
            ("library_origin", &self.library_origin),
        ] {
            reqwest::Url::parse(value)
                .with_context(|| format!("Invalid {}: {}", label, value))?;
        }

        if self.catalog_cache_ttl_secs == 0 {
            anyhow::bail!("catalog_cache_ttl_secs must be >= 1");
        }
        if self.catalog_page_limit == 0 {
            anyhow::bail!("catalog_page_limit must be >= 1");
        }
        if self.enrichment_scrape_limit == 0 {
            anyhow::bail!("enrichment_scrape_limit must be >= 1");
        }
        if self.suitability_threshold_b <= 0.0 {
            anyhow::bail!(
                "suitability_threshold_b must be positive (got {})",
                self.suitability_threshold_b
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be >= 1");
        }

        Ok(())
    }
}

// Default functions
fn default_api_port() -> u16 {
    8000
}
fn default_runtime_url() -> String {
    "http://127.0.0.1:11434".to_string()
}
fn default_library_origin() -> String {
    "https://ollama.com".to_string()
}
fn default_catalog_cache_ttl() -> u64 {
    600
}
fn default_catalog_page_limit() -> usize {
    5
}
fn default_enrichment_scrape_limit() -> usize {
    100
}
fn default_suitability_threshold() -> f64 {
    7.0
}
fn default_request_timeout() -> u64 {
    30
}
fn default_known_param_sizes() -> HashMap<String, String> {
    [
        ("llama3", "8B"),
        ("llama2", "7B"),
        ("mistral", "7B"),
        ("gemma", "2B"),
        ("gemma3", "2B"),
        ("qwen1.5", "7B"),
        ("qwen3", "7B"),
        ("deepseek", "13B"),
        ("deepseek-coder", "7B"),
        ("deepseek-r1", "13B"),
        ("devstral", "7B"),
        ("phi3", "4.2B"),
        ("openhermes", "7B"),
        ("zephyr", "7B"),
        ("codellama", "7B"),
    ]
    .into_iter()
    .map(|(name, size)| (name.to_string(), size.to_string()))
    .collect()
}
