//! OpenAI-compatible chat completion client.
//!
//! ```rust,no_run
//! use lifeos::api::{CompletionClient, CompletionRequest, OpenAi};
//! use lifeos::libs::config::AiConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = OpenAi::new(&AiConfig::default())?;
//! let request = CompletionRequest::new("You are terse.", "Say hi", 64);
//! let text = client.complete(&request).await?;
//! # Ok(())
//! # }
//! ```

use super::{ChatMessage, CompletionClient, CompletionRequest};
use crate::libs::config::AiConfig;
use crate::libs::error::AiError;
use crate::libs::messages::Message;
use crate::msg_debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    max_completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAi {
    /// Builds a client; fails when no API key is configured.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = config.resolved_api_key().ok_or(AiError::MissingApiKey)?;
        Ok(OpenAi {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }
}

impl CompletionClient for OpenAi {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, AiError> {
        let body = ChatRequest {
            model: &self.model,
            messages: &request.messages,
            response_format: request.json.then_some(ResponseFormat { kind: "json_object" }),
            max_completion_tokens: request.max_tokens,
        };

        msg_debug!(Message::AiRequestSent(self.endpoint(), self.model.clone()));
        let response = self.client.post(self.endpoint()).bearer_auth(&self.api_key).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status(status.as_u16()));
        }

        let response: ChatResponse = response.json().await?;
        let choice = response.choices.into_iter().next().ok_or(AiError::EmptyResponse)?;

        Ok(choice.message.content.filter(|content| !content.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_chat_completions_shape() {
        let request = CompletionRequest::new("sys", "hello", 256).json();
        let body = ChatRequest {
            model: "gpt-5",
            messages: &request.messages,
            response_format: Some(ResponseFormat { kind: "json_object" }),
            max_completion_tokens: request.max_tokens,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-5",
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "hello" }
                ],
                "response_format": { "type": "json_object" },
                "max_completion_tokens": 256
            })
        );
    }

    #[test]
    fn missing_key_is_reported() {
        let config = AiConfig {
            api_key: Some("  ".into()),
            ..AiConfig::default()
        };
        if std::env::var(crate::libs::config::API_KEY_ENV).is_err() {
            assert!(matches!(OpenAi::new(&config), Err(AiError::MissingApiKey)));
        }
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let config = AiConfig {
            api_url: "http://localhost:8080/v1/".into(),
            api_key: Some("sk-test".into()),
            ..AiConfig::default()
        };
        assert_eq!(OpenAi::new(&config).unwrap().endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
