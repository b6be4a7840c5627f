//! Short candidate answers for a single follow-up question.

use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::scoring::string_list;
use crate::assistant::chat::CHAT_TEMPERATURE;
use crate::assistant::prompts::SUGGEST_ANSWERS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_prompt, parse_json, ChatModel, LlmError};

const NOT_AVAILABLE: &str = "N/A";

/// Context the client may send along with the question.
#[derive(Debug, Default)]
pub struct SuggestionContext<'a> {
    pub original_analysis: Option<&'a Value>,
    pub resume: Option<&'a str>,
}

/// Strings are used verbatim (clients often send pre-serialized JSON); any
/// other JSON value is serialized compactly.
fn render_analysis(analysis: Option<&Value>) -> String {
    match analysis {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn build_suggestion_prompt(question: &str, ctx: &SuggestionContext<'_>) -> String {
    let analysis = render_analysis(ctx.original_analysis);
    let resume = ctx
        .resume
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE);
    fill(
        SUGGEST_ANSWERS_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("original_analysis", analysis.as_str()),
            ("resume", resume),
            ("question", question),
        ],
    )
}

/// Reads the `suggestions` array; anything unreadable yields an empty list.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    match parse_json::<Value>(raw) {
        Ok(Value::Object(mut map)) => map.remove("suggestions").map(string_list).unwrap_or_default(),
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!("Could not parse suggested answers: {e}");
            Vec::new()
        }
    }
}

/// An empty model reply is an empty list, not a failure.
/// Transport and API errors are returned to the caller.
pub async fn suggest_answers(
    model: &dyn ChatModel,
    question: &str,
    ctx: &SuggestionContext<'_>,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_suggestion_prompt(question, ctx);
    let suggestions = match complete_prompt(model, &prompt, CHAT_TEMPERATURE).await {
        Ok(raw) => parse_suggestions(&raw),
        Err(LlmError::EmptyContent) => Vec::new(),
        Err(e) => return Err(e),
    };
    info!("Suggested {} short answers", suggestions.len());
    Ok(suggestions)
}
