//! OpenAI API Integration
//!
//! Thin client for the two completion endpoints: edit-style
//! (`/v1/edits`) for in-place rewrites and chat-style
//! (`/v1/chat/completions`) for inquiries. One request per call,
//! no retries.

use crate::config::Config;
use crate::core::CompletionBackend;
use crate::error::{TweakError, TweakResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SYSTEM_MESSAGE: &str = "You are a helpful coding assistant.";

#[derive(Debug, Serialize)]
struct EditRequest<'a> {
    model: &'a str,
    input: &'a str,
    instruction: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    #[serde(default)]
    choices: Vec<EditChoice>,
}

#[derive(Debug, Deserialize)]
struct EditChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// First choice's text, trimmed. An empty choice list is a failure.
fn first_edit_text(response: EditResponse) -> TweakResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or(TweakError::EmptyCompletion)
}

fn first_chat_text(response: ChatResponse) -> TweakResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or(TweakError::EmptyCompletion)
}

/// Client for the OpenAI completion endpoints
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    edit_model: String,
    chat_model: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a new client from config
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            edit_model: config.edit_model.clone(),
            chat_model: config.chat_model.clone(),
            timeout: Duration::from_secs(config.request_timeout),
        }
    }

    /// Missing credential fails before any request is constructed
    fn require_api_key(&self) -> TweakResult<()> {
        if self.api_key.is_empty() {
            return Err(TweakError::MissingApiKey);
        }
        Ok(())
    }

    async fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> TweakResult<String> {
        let url = format!("{}{}", self.api_base, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TweakError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn edit(&self, input: &str, instruction: &str) -> TweakResult<String> {
        self.require_api_key()?;

        let payload = EditRequest {
            model: &self.edit_model,
            input,
            instruction,
        };

        let body = self.post_json("/v1/edits", &payload).await?;
        first_edit_text(serde_json::from_str(&body)?)
    }

    async fn complete(&self, prompt: &str) -> TweakResult<String> {
        self.require_api_key()?;

        let payload = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let body = self.post_json("/v1/chat/completions", &payload).await?;
        first_chat_text(serde_json::from_str(&body)?)
    }
}
