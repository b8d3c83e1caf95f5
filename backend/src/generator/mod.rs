//! Generative-model client
//!
//! The generation call is a black box to the rest of the pipeline: prompt
//! string in, JSON-like value or error out. The [`PlanGenerator`] trait is
//! the seam; [`OllamaGenerator`] talks to an Ollama-compatible HTTP
//! endpoint. Nothing here validates plan content — that is the validator's
//! job.

use crate::config::GeneratorConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure modes of a generation call
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generation call timed out")]
    Timeout,

    #[error("generation transport error: {0}")]
    Transport(reqwest::Error),

    #[error("generator returned a malformed response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GeneratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeneratorError::Timeout
        } else {
            GeneratorError::Transport(err)
        }
    }
}

/// A black-box plan generator: prompt in, well-formed JSON out
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value, GeneratorError>;
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint
pub struct OllamaGenerator {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl PlanGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<Value, GeneratorError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!(model = %self.model, prompt_len = prompt.len(), "Calling generator");

        let response = self
            .http
            .post(&url)
            .json(&OllamaRequest {
                model: &self.model,
                prompt,
                stream: false,
                format: "json",
            })
            .send()
            .await?
            .error_for_status()?;

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        let text = strip_code_fences(&body.response);
        serde_json::from_str(text)
            .map_err(|e| GeneratorError::InvalidResponse(format!("response is not JSON: {e}")))
    }
}

/// Models sometimes wrap the JSON document in Markdown code fences even
/// when told not to. Strip a leading/trailing fence pair if present.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
