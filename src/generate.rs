//! Remote text-generation capability with a fail-fast contract.
//!
//! Defines the [`TextGenerator`] trait and two implementations:
//! - **[`GeminiGenerator`]** — calls the Google Generative Language API with
//!   a bounded timeout and a single attempt.
//! - **[`DisabledGenerator`]** — reports itself unavailable; used when no
//!   remote provider is configured.
//!
//! Every failure mode (timeout, network error, non-2xx status, malformed
//! payload) surfaces as an `Err` so callers can fall through to the local
//! deterministic pipeline. Callers must never propagate these errors to the
//! HTTP client — see [`crate::study`].

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::GeneratorConfig;

/// Trait for remote text generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider identifier (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Whether this generator can be called at all. Callers skip straight
    /// to the local pipeline when this is false.
    fn is_available(&self) -> bool {
        true
    }

    /// Generate text from a fully composed instruction string.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ============ Disabled Generator ============

/// Stand-in generator used when no remote provider is configured.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        bail!("Remote generator is disabled")
    }
}

// ============ Gemini Generator ============

/// Remote generator backed by the Google Generative Language API.
///
/// Requires the `GEMINI_API_KEY` environment variable. Makes exactly one
/// attempt per call with the configured timeout; retrying is deliberately
/// left out so a struggling remote endpoint cannot stall a request past
/// the timeout before the local fallback kicks in.
pub struct GeminiGenerator {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a new Gemini generator from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not in the environment or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Gemini API error {}: {}", status, body_text);
        }

        let json: serde_json::Value = response.json().await?;
        json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Gemini response missing candidate text"))
    }
}

/// Create the appropriate [`TextGenerator`] based on configuration.
///
/// | Config Value | Generator |
/// |-------------|-----------|
/// | `"disabled"` | [`DisabledGenerator`] |
/// | `"gemini"` | [`GeminiGenerator`] |
pub fn create_generator(config: &GeneratorConfig) -> Result<Box<dyn TextGenerator>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledGenerator)),
        "gemini" => Ok(Box::new(GeminiGenerator::new(config)?)),
        other => bail!("Unknown generator provider: {}", other),
    }
}

/// Like [`create_generator`], but degrades to [`DisabledGenerator`] when the
/// configured provider cannot be initialized (e.g. missing API key), logging
/// the reason. The process starts and serves from the local pipeline.
pub fn generator_or_disabled(config: &GeneratorConfig) -> Box<dyn TextGenerator> {
    match create_generator(config) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("remote generator unavailable, using local pipeline: {e:#}");
            Box::new(DisabledGenerator)
        }
    }
}
