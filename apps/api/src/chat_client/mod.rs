//! Chat Client — thin proxy to an OpenAI-compatible chat completions endpoint.
//!
//! One user-role message in, the first choice's text out. No retries: any
//! transport failure, non-2xx status or empty reply is returned to the caller.
//!
//! Model: gpt-3.5-turbo (hardcoded)

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("chat completion returned no choices")]
    EmptyChoices,

    #[error("first chat choice has no message content")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice.
    pub fn first_reply(self) -> Result<String, ChatError> {
        let choice = self.choices.into_iter().next().ok_or(ChatError::EmptyChoices)?;
        choice.message.content.ok_or(ChatError::EmptyReply)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, ChatError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
        })
    }

    /// Sends `message` as a single user turn and returns the first reply.
    pub async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let request_body = CompletionRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: message,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        debug!("Chat completion returned {} choice(s)", completion.choices.len());

        completion.first_reply()
    }
}
