use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7400".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_provider")]
    pub provider: String,
    #[serde(default = "default_generator_model")]
    pub model: String,
    #[serde(default = "default_generator_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: default_generator_provider(),
            model: default_generator_model(),
            timeout_secs: default_generator_timeout_secs(),
        }
    }
}

fn default_generator_provider() -> String {
    "disabled".to_string()
}
fn default_generator_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_generator_timeout_secs() -> u64 {
    40
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            model: None,
            dims: None,
            timeout_secs: default_embedding_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_embedding_provider() -> String {
    "hash".to_string()
}
fn default_embedding_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    5
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate generator
    match config.generator.provider.as_str() {
        "disabled" | "gemini" => {}
        other => anyhow::bail!(
            "Unknown generator provider: '{}'. Must be disabled or gemini.",
            other
        ),
    }
    if config.generator.timeout_secs == 0 {
        anyhow::bail!("generator.timeout_secs must be > 0");
    }

    // Validate embedding
    match config.embedding.provider.as_str() {
        "hash" | "openai" | "disabled" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be hash, openai, or disabled.",
            other
        ),
    }
    if config.embedding.provider == "openai" {
        if config.embedding.model.is_none() {
            anyhow::bail!("embedding.model must be specified when provider is 'openai'");
        }
        if config.embedding.dims.is_none() || config.embedding.dims == Some(0) {
            anyhow::bail!("embedding.dims must be > 0 when provider is 'openai'");
        }
    }
    if config.embedding.dims == Some(0) {
        anyhow::bail!("embedding.dims must be > 0");
    }

    Ok(config)
}
