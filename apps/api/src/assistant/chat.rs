//! Program assistant: system prompt assembly and reply normalization.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::scoring::string_list;
use crate::assistant::prompts::{NO_ANALYSIS_PLACEHOLDER, PROGRAM_SYSTEM_PROMPT_TEMPLATE};
use crate::config::ProgramProfile;
use crate::errors::AppError;
use crate::llm_client::prompts::fill;
use crate::llm_client::{parse_json, ChatMessage, ChatModel};
use crate::models::conversation::ConversationMessage;

/// Conversational replies read better with some variety.
pub const CHAT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub reply: String,
    pub suggested_questions: Vec<String>,
}

pub fn build_system_prompt(program: &ProgramProfile, analysis: Option<&Value>) -> String {
    let analysis = match analysis {
        Some(value) if !value.is_null() => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
        _ => NO_ANALYSIS_PLACEHOLDER.to_string(),
    };
    fill(
        PROGRAM_SYSTEM_PROMPT_TEMPLATE,
        &[
            ("program_name", program.name.as_str()),
            ("institution", program.institution.as_str()),
            ("analysis", analysis.as_str()),
        ],
    )
}

/// The outbound conversation: system prompt first, then the history in order.
pub fn build_messages(
    program: &ProgramProfile,
    analysis: Option<&Value>,
    history: &[ConversationMessage],
) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::system(build_system_prompt(program, analysis)))
        .chain(history.iter().map(ChatMessage::from))
        .collect()
}

/// Reads `{reply, suggestedQuestions}` out of the model output.
///
/// Unstructured output becomes the reply as-is. A blank or missing `reply`
/// falls back to the raw text, and a non-array `suggestedQuestions` to an
/// empty list.
pub fn parse_reply(raw: &str) -> AssistantReply {
    let fallback = || AssistantReply {
        reply: raw.to_string(),
        suggested_questions: Vec::new(),
    };

    let Ok(Value::Object(mut map)) = parse_json::<Value>(raw) else {
        warn!("Assistant reply was not a JSON object; returning raw text");
        return fallback();
    };

    let reply = match map.remove("reply") {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        _ => raw.to_string(),
    };
    let suggested_questions = map
        .remove("suggestedQuestions")
        .map(string_list)
        .unwrap_or_default();

    AssistantReply {
        reply,
        suggested_questions,
    }
}

pub async fn converse(
    model: &dyn ChatModel,
    program: &ProgramProfile,
    analysis: Option<&Value>,
    history: &[ConversationMessage],
) -> Result<AssistantReply, AppError> {
    if history.is_empty() {
        return Err(AppError::Validation(
            "At least one message is required.".to_string(),
        ));
    }

    let messages = build_messages(program, analysis, history);
    let raw = model.complete(&messages, CHAT_TEMPERATURE).await?;
    let reply = parse_reply(&raw);
    info!(
        "Assistant replied after {} turns with {} suggested questions",
        history.len(),
        reply.suggested_questions.len()
    );
    Ok(reply)
}
