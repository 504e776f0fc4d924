//! Chat-completion transport for the external generation backend.
//!
//! The trait keeps the engine testable with in-memory fakes; the HTTP
//! implementation talks to an OpenAI-compatible chat-completions endpoint
//! with a bearer credential. Exactly one POST per inference run, no retries
//! (a single failure triggers the deterministic fallback upstream).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

use crate::error::InferenceError;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const ERROR_BODY_MAX_CHARS: usize = 320;

/// Backend configuration, passed explicitly into the engine constructor.
///
/// No ambient/global state: absence of `api_key` deterministically selects
/// fallback mode at every run until a configured value is supplied.
#[derive(Debug, Clone)]
pub struct AiBackendConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    /// Expiry is an adapter failure like any other: the run falls back.
    pub timeout: Duration,
}

impl Default for AiBackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AiBackendConfig {
    /// Fallback-only configuration (no credential).
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

/// One chat-style completion: system instruction + one user message → text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, InferenceError>;
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: JsonValue,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// `reqwest`-backed [`ChatCompletion`] against an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpChatClient {
    pub fn new(config: &AiBackendConfig) -> Result<Self, InferenceError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                InferenceError::InvalidConfig("api key is not set".to_string())
            })?
            .to_string();

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InferenceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatCompletion for HttpChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, InferenceError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status,
                body: truncate(&body, ERROR_BODY_MAX_CHARS),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Transport(format!("invalid backend response: {e}")))?;

        let choice = body.choices.first().ok_or_else(|| {
            InferenceError::Transport("backend response did not include choices".to_string())
        })?;

        Ok(extract_text(&choice.message.content))
    }
}

/// Message content may be a plain string or an array of typed parts.
fn extract_text(content: &JsonValue) -> String {
    match content {
        JsonValue::String(text) => text.clone(),
        JsonValue::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(JsonValue::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_without_key_is_not_configured() {
        assert!(!AiBackendConfig::disabled().is_configured());
        assert!(!AiBackendConfig::with_api_key("   ").is_configured());
        assert!(AiBackendConfig::with_api_key("sk-test").is_configured());
    }

    #[test]
    fn client_rejects_missing_credential() {
        let err = HttpChatClient::new(&AiBackendConfig::disabled()).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidConfig(_)));
    }

    #[test]
    fn client_builds_with_a_credential() {
        let client = HttpChatClient::new(&AiBackendConfig::with_api_key("sk-test")).unwrap();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn content_text_extraction_handles_both_shapes() {
        assert_eq!(extract_text(&json!("hola")), "hola");
        assert_eq!(
            extract_text(&json!([{"type": "text", "text": "a"}, {"type": "text", "text": "b"}])),
            "a\nb"
        );
        assert_eq!(extract_text(&json!(42)), "");
    }

    #[test]
    fn error_bodies_are_truncated() {
        let long = "x".repeat(1000);
        let out = truncate(&long, ERROR_BODY_MAX_CHARS);
        assert_eq!(out.chars().count(), ERROR_BODY_MAX_CHARS + 3);
        assert!(out.ends_with("..."));
    }
}
