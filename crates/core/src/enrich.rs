//! Optional free-text enrichment of catalog display texts.
//!
//! The enrichment provider is a capability injected into the generator: the
//! condition synthesizer makes one best-effort call per resource and falls
//! back to the catalog display text on any failure. No retries, and no error
//! ever crosses the synthesizer boundary.

use crate::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use std::time::Duration;

/// Environment variables the HTTP enrichment client is configured from.
pub const ENV_ENDPOINT: &str = "IPS_ENRICH_ENDPOINT";
pub const ENV_API_KEY: &str = "IPS_ENRICH_API_KEY";
pub const ENV_MODEL: &str = "IPS_ENRICH_MODEL";

/// Capability interface for free-text enrichment.
///
/// Implementations are stateless from the caller's perspective; one call is
/// made per condition resource.
pub trait Enricher {
    /// Produce a short descriptive substitute for a catalog display text.
    fn complete(&self, prompt: &str, system_instructions: &str) -> GeneratorResult<String>;
}

/// Enricher that always declines, for deterministic generation and tests.
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    fn complete(&self, _prompt: &str, _system_instructions: &str) -> GeneratorResult<String> {
        Err(GeneratorError::InvalidInput("enrichment disabled".into()))
    }
}

#[derive(Deserialize)]
struct ChatCompletionRes {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Chat-completions-backed enrichment provider.
///
/// Posts a system + user message pair to the configured endpoint and returns
/// the first choice's content. The request carries a client-side timeout so a
/// stalled provider cannot block assembly indefinitely.
pub struct HttpEnricher {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpEnricher {
    /// Build a client from the `IPS_ENRICH_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidInput`] when a required variable is
    /// missing or the HTTP client cannot be constructed. Callers treat this
    /// as "enrichment unavailable" and continue without it.
    pub fn from_env() -> GeneratorResult<Self> {
        let endpoint = require_env(ENV_ENDPOINT)?;
        let api_key = require_env(ENV_API_KEY)?;
        let model = require_env(ENV_MODEL)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| {
                GeneratorError::InvalidInput(format!("failed to build enrichment client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
        })
    }
}

impl Enricher for HttpEnricher {
    fn complete(&self, prompt: &str, system_instructions: &str) -> GeneratorResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_instructions},
                {"role": "user", "content": prompt},
            ],
            "temperature": 0.7,
            "max_tokens": 150,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| GeneratorError::InvalidInput(format!("enrichment request failed: {e}")))?;

        let parsed: ChatCompletionRes = response.json().map_err(|e| {
            GeneratorError::InvalidInput(format!("malformed enrichment response: {e}"))
        })?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                GeneratorError::InvalidInput("enrichment response had no content".into())
            })?;

        Ok(content)
    }
}

fn require_env(name: &str) -> GeneratorResult<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GeneratorError::InvalidInput(format!("{name} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_enrichment_always_declines() {
        let err = NoEnrichment
            .complete("prompt", "instructions")
            .expect_err("should decline");
        match err {
            GeneratorError::InvalidInput(msg) => assert!(msg.contains("disabled")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn chat_completion_response_parses_first_choice() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": " a note "}}]}"#;
        let parsed: ChatCompletionRes = serde_json::from_str(json).expect("parse response");
        assert_eq!(parsed.choices[0].message.content, " a note ");
    }
}
