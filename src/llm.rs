//! Chat-completion client for an OpenAI-compatible endpoint.
//!
//! One client serves all three call shapes (keywords, per-article summary,
//! report synthesis) plus the assisted-extraction fallback; callers pick the
//! model, the system instruction, and the sampling temperature per call.
//! The provider is swappable through the configured base URL.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::utils::truncate_for_log;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Pull the first choice's trimmed content out of a response body.
fn first_content(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Thin chat client over `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Send one system+user exchange and return the model's text.
    ///
    /// An empty message content is reported as [`LlmError::EmptyResponse`]
    /// rather than an empty string so callers never mistake it for output.
    #[instrument(level = "info", skip_all, fields(%model))]
    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let t0 = Instant::now();
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model,
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_for_log(&body, 300), "chat API rejected the request");
            return Err(LlmError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = first_content(parsed).ok_or(LlmError::EmptyResponse)?;
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            chars = content.chars().count(),
            "chat call completed"
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_content_happy_path() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  반도체\n수출  "}, "finish_reason": "stop"}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_content(response).as_deref(), Some("반도체\n수출"));
    }

    #[test]
    fn test_first_content_empty_variants() {
        let no_choices: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(first_content(no_choices), None);

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert_eq!(first_content(null_content), None);

        let blank_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "   "}}]}"#).unwrap();
        assert_eq!(first_content(blank_content), None);
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            model: "gpt-4o",
            temperature: 0.2,
            messages: vec![
                ChatMessage { role: "system", content: "s" },
                ChatMessage { role: "user", content: "u" },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }
}
