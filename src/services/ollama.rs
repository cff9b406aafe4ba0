//! Ollama API client.
//!
//! Used for last-resort suggestions on filenames pattern matching cannot
//! settle. Configuration comes from environment variables:
//! - `OLLAMA_HOST`: service URL (default: http://localhost:11434)
//! - `OLLAMA_MODEL`: model to use (default: qwen2.5:7b)
//! - `OLLAMA_TIMEOUT`: request timeout in seconds (default: 300)

use crate::services::llm::SegmentSuggester;
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "qwen2.5:7b";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults when unset.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("OLLAMA_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            model,
            timeout_secs,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Ollama API client.
pub struct OllamaClient {
    config: OllamaConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    /// 0 = deterministic sampling
    temperature: f32,
    seed: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a client from environment configuration.
    pub fn new() -> Self {
        Self::with_config(OllamaConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: OllamaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Check if the Ollama service is reachable.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Generate text from a prompt. Deterministic sampling so the same
    /// filename always yields the same suggestion.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                seed: 42,
            },
        };

        let resp: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        Ok(resp.response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentSuggester for OllamaClient {
    async fn suggest_segments(&self, filename: &str, expected: usize) -> Result<Vec<String>> {
        let prompt = format!(
            "The video file '{filename}' contains {expected} distinct episode segments. \
             List the {expected} segment titles, one per line, with no numbering, \
             bullets or commentary."
        );

        let response = self.generate(&prompt).await?;
        let titles = parse_title_lines(&response);

        if titles.is_empty() {
            return Err(Error::LlmResponse(format!(
                "no usable titles in response for '{filename}'"
            )));
        }
        Ok(titles)
    }
}

/// Extract clean title lines from a model response.
///
/// Reasoning models wrap deliberation in `<think>` tags, and models often
/// number or bullet their lists despite instructions; both are stripped.
fn parse_title_lines(response: &str) -> Vec<String> {
    let without_think = match Regex::new(r"(?s)<think>.*?</think>") {
        Ok(re) => re.replace_all(response, "").to_string(),
        Err(_) => response.to_string(),
    };

    let prefix_re = Regex::new(r"^\s*(?:[-*\u{2022}]|\d{1,2}[.)])\s*").ok();

    without_think
        .lines()
        .map(|line| match &prefix_re {
            Some(re) => re.replace(line, "").trim().to_string(),
            None => line.trim().to_string(),
        })
        .filter(|line| !line.is_empty())
        .collect()
}
