//! Axum route handlers for the scoring API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::analysis::intake::ResumeForm;
use crate::analysis::scoring::{rescore, score_resume, FollowUpContext};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;
use crate::taxonomy::{self, CategoryView};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_results: AnalysisResult,
    pub followup_questions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupResponse {
    pub updated_analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub followup_questions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/analyze
pub async fn handle_analyze_hello() -> Json<Value> {
    Json(json!({ "message": "Hello from /api/analyze" }))
}

/// GET /api/skills
pub async fn handle_skills() -> Json<Vec<CategoryView>> {
    Json(taxonomy::describe())
}

/// POST /api/analyze
///
/// Multipart: `email` plus one of `resume` (file), `manualResume` (text) or
/// `manualAnswers` (JSON). Returns scores and follow-up questions.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let form = ResumeForm::read(&mut multipart).await?;
    let (_email, source) = form.require_submission()?;

    let resume_text = source.into_text().await?;
    info!(%request_id, "Analyzing resume ({} chars)", resume_text.len());

    let outcome = score_resume(state.llm.as_ref(), &resume_text).await?;

    Ok(Json(AnalyzeResponse {
        analysis_results: outcome.analysis,
        followup_questions: outcome.followup_questions,
    }))
}

/// POST /api/followup
///
/// Multipart: the original resume input, `originalAnalysis`, `questions` and
/// `followupResponses` (all JSON). Returns the re-scored analysis.
pub async fn handle_followup(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FollowupResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let form = ResumeForm::read(&mut multipart).await?;
    let (_email, source) = form.require_submission()?;

    let responses: Vec<String> =
        form.json_field("followupResponses", "Missing follow-up responses.")?;
    let original_analysis: AnalysisResult =
        form.json_field("originalAnalysis", "Missing original analysis data.")?;
    let questions: Vec<String> = form.json_field("questions", "Missing follow-up questions.")?;

    let resume_text = source.into_text().await?;
    info!(
        %request_id,
        "Re-scoring resume with {} questions / {} responses",
        questions.len(),
        responses.len()
    );

    let outcome = rescore(
        state.llm.as_ref(),
        &FollowUpContext {
            original_analysis: &original_analysis,
            questions: &questions,
            responses: &responses,
            resume_text: &resume_text,
        },
    )
    .await?;

    Ok(Json(FollowupResponse {
        updated_analysis: outcome.analysis,
        followup_questions: outcome.followup_questions,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::llm_client::testing::{Scripted, ScriptedModel};
    use crate::models::analysis::fixtures::uniform;
    use crate::routes::testing::{post_multipart, MultipartBody};
    use crate::taxonomy::{DIGITAL, PROFESSIONAL};

    fn scores_reply(score: u8, questions: &[&str]) -> String {
        let mut value = serde_json::to_value(uniform(score)).unwrap();
        value["followupQuestions"] = serde_json::json!(questions);
        value.to_string()
    }

    #[tokio::test]
    async fn test_analyze_plain_text_upload() {
        let model = Arc::new(ScriptedModel::replying([scores_reply(
            5,
            &["Have you run a Scrum team?"],
        )]));
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .file("resume", "resume.txt", "text/plain", b"Led a cross-functional team");

        let (status, json) = post_multipart(model.clone(), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["analysisResults"][PROFESSIONAL]["Communication"], 5);
        assert_eq!(json["followupQuestions"][0], "Have you run a Scrum team?");
        assert!(model.last_prompt().contains("Led a cross-functional team"));
    }

    #[tokio::test]
    async fn test_analyze_echoes_fractional_scores() {
        let model = Arc::new(ScriptedModel::replying([
            r#"{"Digital Skills": {"Agile": 7.5, "Scrum": 3}, "followupQuestions": []}"#,
        ]));
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Scrum master, 2 years");

        let (status, json) = post_multipart(model, "/api/analyze", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["analysisResults"][DIGITAL]["Agile"], 7.5);
        assert_eq!(json["analysisResults"][DIGITAL]["Scrum"], 3);
    }

    #[tokio::test]
    async fn test_analyze_manual_resume() {
        let model = Arc::new(ScriptedModel::replying([scores_reply(2, &[])]));
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Role in the Last 18 Months: Barista");

        let (status, json) = post_multipart(model.clone(), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["followupQuestions"], serde_json::json!([]));
        assert!(model.last_prompt().contains("Barista"));
    }

    #[tokio::test]
    async fn test_analyze_missing_email_is_400_without_llm_call() {
        let model = Arc::new(ScriptedModel::default());
        let body = MultipartBody::new().file("resume", "r.txt", "text/plain", b"text");

        let (status, json) = post_multipart(model.clone(), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_malformed_reply_returns_raw() {
        let model = Arc::new(ScriptedModel::replying(["I think this candidate is great!"]));
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Some resume");

        let (status, json) = post_multipart(model, "/api/analyze", body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "MALFORMED_LLM_RESPONSE");
        assert_eq!(json["error"]["raw"], "I think this candidate is great!");
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_is_500() {
        let model = Arc::new(ScriptedModel::with([Scripted::Fail(503)]));
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Some resume");

        let (status, json) = post_multipart(model.clone(), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "LLM_ERROR");
        assert_eq!(model.calls().len(), 1, "upstream failures are not retried");
    }

    #[tokio::test]
    async fn test_analyze_bad_pdf_is_extraction_error() {
        let model = Arc::new(ScriptedModel::default());
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .file("resume", "resume.pdf", "application/pdf", b"definitely not a pdf");

        let (status, json) = post_multipart(model.clone(), "/api/analyze", body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "EXTRACTION_ERROR");
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_followup_rescores_with_answers() {
        let model = Arc::new(ScriptedModel::replying([scores_reply(8, &[])]));
        let original = serde_json::to_string(&uniform(3)).unwrap();
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Project manager at a logistics firm")
            .text("originalAnalysis", &original)
            .text("questions", r#"["Have you used Agile?"]"#)
            .text("followupResponses", r#"["Yes, daily stand-ups for 3 years"]"#);

        let (status, json) = post_multipart(model.clone(), "/api/followup", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["updatedAnalysis"][DIGITAL]["Agile"], 8);
        assert!(json.get("followupQuestions").is_none());
        let prompt = model.last_prompt();
        assert!(prompt.contains("Question 1: Have you used Agile?"));
        assert!(prompt.contains("Response 1: Yes, daily stand-ups for 3 years"));
    }

    #[tokio::test]
    async fn test_followup_missing_responses_is_400() {
        let model = Arc::new(ScriptedModel::default());
        let body = MultipartBody::new()
            .text("email", "jane@example.com")
            .text("manualResume", "Resume")
            .text("originalAnalysis", "{}")
            .text("questions", "[]");

        let (status, json) = post_multipart(model, "/api/followup", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Missing follow-up responses.");
    }
}
