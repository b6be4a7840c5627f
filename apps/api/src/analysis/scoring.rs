//! Skill scoring: prompt assembly, the completion call, and response normalization.

use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::prompts::{FOLLOWUP_PROMPT_TEMPLATE, SCORING_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_prompt, parse_json, ChatModel};
use crate::models::analysis::AnalysisResult;
use crate::taxonomy;

/// Low temperature keeps scores stable across resubmissions.
pub const SCORING_TEMPERATURE: f32 = 0.2;

/// Keys the model has been seen to use for the follow-up question list.
const FOLLOWUP_KEYS: &[&str] = &[
    "followupQuestions",
    "followUpQuestions",
    "followup_questions",
    "questions",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub analysis: AnalysisResult,
    pub followup_questions: Vec<String>,
}

/// Everything the re-scoring prompt needs.
pub struct FollowUpContext<'a> {
    pub original_analysis: &'a AnalysisResult,
    pub questions: &'a [String],
    pub responses: &'a [String],
    pub resume_text: &'a str,
}

pub fn build_scoring_prompt(resume_text: &str) -> String {
    let listing = taxonomy::render_listing();
    let skeleton = taxonomy::render_score_skeleton();
    fill(
        SCORING_PROMPT_TEMPLATE,
        &[
            ("taxonomy_listing", listing.as_str()),
            ("score_skeleton", skeleton.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("resume_text", resume_text),
        ],
    )
}

pub fn build_followup_prompt(ctx: &FollowUpContext<'_>) -> String {
    let original = serde_json::to_string_pretty(ctx.original_analysis).unwrap_or_default();
    let followup_qa = format_followup_qa(ctx.questions, ctx.responses);
    let skeleton = taxonomy::render_score_skeleton();
    fill(
        FOLLOWUP_PROMPT_TEMPLATE,
        &[
            ("original_analysis", original.as_str()),
            ("followup_qa", followup_qa.as_str()),
            ("score_skeleton", skeleton.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("resume_text", ctx.resume_text),
        ],
    )
}

/// Pairs each question with the response at the same index; a missing response is blank.
fn format_followup_qa(questions: &[String], responses: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let response = responses.get(i).map(String::as_str).unwrap_or("");
            format!("Question {n}: {q}\nResponse {n}: {response}", n = i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Parses a scoring reply, splitting any follow-up questions off the scores.
/// Anything that is not a JSON object of category → skill → value is malformed.
/// Score values themselves are passed through as the model wrote them.
pub fn parse_scoring_response(raw: &str) -> Result<ScoringOutcome, AppError> {
    let malformed = |reason: String| AppError::MalformedResponse {
        reason,
        raw: raw.to_string(),
    };

    let value: Value = parse_json(raw).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(mut map) = value else {
        return Err(malformed("expected a JSON object at the top level".to_string()));
    };

    let mut followup_questions = Vec::new();
    for key in FOLLOWUP_KEYS {
        if let Some(value) = map.remove(*key) {
            if followup_questions.is_empty() {
                followup_questions = string_list(value);
            }
        }
    }

    let analysis: AnalysisResult =
        serde_json::from_value(Value::Object(map)).map_err(|e| malformed(e.to_string()))?;
    if analysis.is_empty() {
        return Err(malformed("no skill categories in response".to_string()));
    }

    Ok(ScoringOutcome {
        analysis,
        followup_questions,
    })
}

/// Non-empty strings of a JSON array; anything else yields an empty list.
pub(crate) fn string_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn log_coverage(outcome: &ScoringOutcome) {
    let missing = outcome.analysis.missing_skills();
    if !missing.is_empty() {
        let names: Vec<_> = missing
            .iter()
            .map(|m| format!("{}/{}", m.category, m.skill))
            .collect();
        warn!(
            "Model left {} taxonomy skills unscored: {}",
            missing.len(),
            names.join(", ")
        );
    }
}

/// Scores a resume from scratch.
pub async fn score_resume(
    model: &dyn ChatModel,
    resume_text: &str,
) -> Result<ScoringOutcome, AppError> {
    let prompt = build_scoring_prompt(resume_text);
    let raw = complete_prompt(model, &prompt, SCORING_TEMPERATURE).await?;
    let outcome = parse_scoring_response(&raw)?;
    log_coverage(&outcome);
    info!(
        "Scored resume: {} categories, {} follow-up questions",
        outcome.analysis.0.len(),
        outcome.followup_questions.len()
    );
    Ok(outcome)
}

/// Re-scores with the candidate's follow-up answers folded in.
pub async fn rescore(
    model: &dyn ChatModel,
    ctx: &FollowUpContext<'_>,
) -> Result<ScoringOutcome, AppError> {
    let prompt = build_followup_prompt(ctx);
    let raw = complete_prompt(model, &prompt, SCORING_TEMPERATURE).await?;
    let outcome = parse_scoring_response(&raw)?;
    log_coverage(&outcome);
    info!("Re-scored resume with {} follow-up answers", ctx.responses.len());
    Ok(outcome)
}
