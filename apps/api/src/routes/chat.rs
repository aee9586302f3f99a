use axum::extract::State;
use serde::Deserialize;

use crate::chat_client::ChatClient;
use crate::errors::AppError;
use crate::extract::AppJson;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat
/// Forwards the message to the completions API and returns the reply as plain text.
pub async fn handle_chat(
    State(chat): State<ChatClient>,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<String, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }
    Ok(chat.chat(&req.message).await?)
}
