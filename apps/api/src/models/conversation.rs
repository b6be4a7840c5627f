use serde::{Deserialize, Serialize};

use crate::llm_client::ChatMessage;

/// Who said a message. Clients may only send user and assistant turns;
/// the system prompt is always built server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Speaker,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ConversationMessage> for ChatMessage {
    fn from(message: &ConversationMessage) -> Self {
        match message.role {
            Speaker::User => ChatMessage::user(message.content.clone()),
            Speaker::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}
