//! Clients for external services.
//!
//! lifeos talks to a single kind of service: an OpenAI-compatible chat
//! completion endpoint. [`CompletionClient`] is the seam the AI features use,
//! so they can be driven by a canned client in tests.

use crate::libs::error::AiError;
use serde::Serialize;

pub mod openai;

pub use openai::OpenAi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Ask the model for a JSON object instead of free text.
    pub json: bool,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        CompletionRequest {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            json: false,
            max_tokens,
        }
    }

    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Anything that can answer a [`CompletionRequest`].
///
/// Returns the text of the first choice; `Ok(None)` when the model answered
/// with empty content.
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, AiError>;
}
