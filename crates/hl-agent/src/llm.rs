//! Ollama text-generation client.
//!
//! Calls the local Ollama `/api/generate` endpoint with `stream: true`
//! and concatenates the NDJSON response chunks until the `done` marker
//! (or end of body). Connection and timeout failures surface as a typed
//! `LlmError`, never as text — callers branch on the `Result` and fall
//! back to their stage-local degraded path. No retries: a failed call
//! degrades immediately.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the Ollama generation endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection failure or request timeout.
    #[error("ollama unreachable: {0}")]
    Unreachable(String),

    /// Non-success HTTP status from the server.
    #[error("ollama returned status {0}")]
    Status(u16),
}

/// Configuration for the Ollama endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Ollama HTTP API base URL.
    #[serde(default = "default_host")]
    pub host: String,
    /// Model to use for generation.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "gemma3:1b".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Ollama generate API request body.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

/// One streamed NDJSON chunk (only the fields we need).
#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
}

/// Client for the Ollama generation endpoint.
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate text for a prompt.
    ///
    /// Returns the concatenated, trimmed response text, or an `LlmError`
    /// when the service is unreachable or returns a non-success status.
    /// Undecodable stream lines are skipped.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.host);
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: true,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature,
            },
        };

        let mut response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "ollama request failed");
                LlmError::Unreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ollama returned non-200");
            return Err(LlmError::Status(response.status().as_u16()));
        }

        let mut buf: Vec<u8> = Vec::new();
        let mut output = String::new();

        'stream: while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| LlmError::Unreachable(e.to_string()))?
        {
            buf.extend_from_slice(&chunk);
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                if line.trim_ascii().is_empty() {
                    continue;
                }
                match serde_json::from_slice::<StreamChunk>(&line) {
                    Ok(parsed) => {
                        if let Some(fragment) = parsed.response {
                            output.push_str(&fragment);
                        }
                        if parsed.done {
                            break 'stream;
                        }
                    }
                    // Skip undecodable lines; the stream may interleave noise.
                    Err(e) => {
                        tracing::debug!(error = %e, "skipping undecodable stream line");
                    }
                }
            }
        }

        // Handle a final chunk without a trailing newline.
        if !buf.trim_ascii().is_empty()
            && let Ok(parsed) = serde_json::from_slice::<StreamChunk>(&buf)
            && let Some(fragment) = parsed.response
        {
            output.push_str(&fragment);
        }

        Ok(output.trim().to_string())
    }
}
