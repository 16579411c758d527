//! Paraphrasing through the Hugging Face inference API
//!
//! Blocking client: the pipeline is single-threaded and rewrites one record
//! at a time, so requests are issued serially.

use super::Rewriter;
use crate::config::RewriteConfig;
use crate::error::{CatalogError, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;

const PROMPT: &str =
    "Paraphrase the following text to be clearer and use higher-precision vocabulary:\n\n";

/// Rewriter backed by a hosted text-generation model
pub struct HuggingFaceRewriter {
    client: Client,
    config: RewriteConfig,
    token: String,
}

impl HuggingFaceRewriter {
    /// Create a rewriter; fails if the config carries no token
    pub fn new(config: RewriteConfig) -> Result<Self> {
        config.validate()?;
        let token = config
            .api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("HUGGINGFACE_API_TOKEN not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request(&self, snippet: &str) -> Result<String> {
        let url = self.model_url();
        let payload = json!({ "inputs": format!("{}{}", PROMPT, snippet) });

        for attempt in 0..self.config.max_retries {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.token)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(&payload)
                .send()?;

            let status = response.status();
            if status == StatusCode::OK {
                let body: Value = response
                    .json()
                    .map_err(|e| CatalogError::Rewrite(format!("Failed to parse response: {}", e)))?;
                return Ok(extract_generated_text(&body));
            }

            if is_retryable(status) {
                let backoff = Duration::from_secs(1 + u64::from(attempt) * 2);
                log::debug!(
                    "Inference API returned {} (attempt {}), retrying in {:?}",
                    status,
                    attempt + 1,
                    backoff
                );
                std::thread::sleep(backoff);
                continue;
            }

            let body = response.text().unwrap_or_default();
            return Err(CatalogError::Rewrite(format!(
                "Inference API error {}: {}",
                status.as_u16(),
                body
            )));
        }

        Err(CatalogError::Rewrite(
            "Paraphrase failed after retries".to_string(),
        ))
    }
}

impl Rewriter for HuggingFaceRewriter {
    fn rewrite(&self, text: &str) -> Result<String> {
        let result = self.request(truncate_chars(text, self.config.max_chars));
        // Pace every call, failed ones included
        if self.config.delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.delay_ms));
        }
        result
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

/// Leading `max_chars` characters of `text`
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

/// Pull the generated text out of the shapes the inference API returns
fn extract_generated_text(body: &Value) -> String {
    match body {
        Value::Array(items) => match items.first() {
            Some(first @ Value::Object(_)) => extract_generated_text(first),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Value::Object(map) => ["generated_text", "text"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
