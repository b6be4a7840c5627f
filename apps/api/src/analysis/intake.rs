//! Multipart intake shared by the analyze and follow-up endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::extract_text_blocking;
use crate::extraction::manual::ManualAnswers;

pub const EMAIL_FIELD: &str = "email";
pub const RESUME_FIELD: &str = "resume";
pub const MANUAL_RESUME_FIELD: &str = "manualResume";
pub const MANUAL_ANSWERS_FIELD: &str = "manualAnswers";

#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Where the resume text comes from. An upload wins over typed text.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    Upload(Upload),
    ManualText(String),
    ManualAnswers(ManualAnswers),
}

/// A decoded multipart submission.
#[derive(Debug, Default)]
pub struct ResumeForm {
    pub email: Option<String>,
    pub upload: Option<Upload>,
    pub manual_resume: Option<String>,
    pub manual_answers: Option<String>,
    /// Every other text field, by name.
    pub fields: HashMap<String, String>,
}

impl ResumeForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == RESUME_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was picked
                if bytes.is_empty() {
                    continue;
                }
                debug!(
                    "Received upload {:?} ({:?}, {} bytes)",
                    file_name,
                    content_type,
                    bytes.len()
                );
                form.upload = Some(Upload {
                    file_name,
                    content_type,
                    bytes,
                });
                continue;
            }

            let value = field.text().await?;
            if value.trim().is_empty() {
                continue;
            }
            match name.as_str() {
                EMAIL_FIELD => form.email = Some(value.trim().to_string()),
                MANUAL_RESUME_FIELD => form.manual_resume = Some(value),
                MANUAL_ANSWERS_FIELD => form.manual_answers = Some(value),
                _ => {
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Validates that both the email and some resume input are present.
    pub fn require_submission(&self) -> Result<(&str, ResumeSource), AppError> {
        let source = self.source()?;
        match (self.email.as_deref(), source) {
            (Some(email), Some(source)) => Ok((email, source)),
            _ => Err(AppError::Validation(
                "Email and resume input are required.".to_string(),
            )),
        }
    }

    fn source(&self) -> Result<Option<ResumeSource>, AppError> {
        if let Some(upload) = &self.upload {
            return Ok(Some(ResumeSource::Upload(upload.clone())));
        }
        if let Some(text) = &self.manual_resume {
            return Ok(Some(ResumeSource::ManualText(text.clone())));
        }
        match &self.manual_answers {
            Some(raw) => {
                let answers: ManualAnswers = serde_json::from_str(raw).map_err(|e| {
                    AppError::Validation(format!("{MANUAL_ANSWERS_FIELD} is not valid JSON: {e}"))
                })?;
                Ok(Some(ResumeSource::ManualAnswers(answers)))
            }
            None => Ok(None),
        }
    }

    /// Parses a JSON-encoded text field, as the follow-up endpoint receives them.
    pub fn json_field<T: DeserializeOwned>(&self, name: &str, missing: &str) -> Result<T, AppError> {
        let raw = self
            .fields
            .get(name)
            .ok_or_else(|| AppError::Validation(missing.to_string()))?;
        serde_json::from_str(raw)
            .map_err(|e| AppError::Validation(format!("{name} is not valid JSON: {e}")))
    }
}

impl ResumeSource {
    /// Normalizes any source into one resume text blob.
    pub async fn into_text(self) -> Result<String, AppError> {
        let text = match self {
            ResumeSource::Upload(upload) => {
                extract_text_blocking(upload.bytes, upload.content_type).await?
            }
            ResumeSource::ManualText(text) => text,
            ResumeSource::ManualAnswers(answers) => {
                let unanswered = answers.unanswered();
                if !unanswered.is_empty() {
                    return Err(AppError::Validation(format!(
                        "Please answer all the questions. Missing: {}",
                        unanswered.join(", ")
                    )));
                }
                answers.compose()
            }
        };

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "No text could be extracted from the resume.".to_string(),
            ));
        }
        Ok(text)
    }
}
