//! Resume text extraction.
//!
//! Dispatch is on the declared MIME type only: PDF and Word documents go to their
//! extractors, anything else is read as (lossy) UTF-8. Failures are terminal.

pub mod docx;
pub mod manual;
pub mod pdf;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word document extraction failed: {0}")]
    Word(String),

    #[error("Extractor crashed: {0}")]
    Crashed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    /// Parameters such as `; charset=binary` are ignored.
    pub fn from_mime(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match essence.as_deref() {
            Some(PDF_MIME) => DocumentKind::Pdf,
            Some(DOCX_MIME) | Some(DOC_MIME) => DocumentKind::Word,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Extracts text synchronously. Prefer [`extract_text_blocking`] from async code.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Word => docx::extract(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };
    debug!("Extracted {} chars from {:?} document", text.len(), kind);
    Ok(text)
}

/// Runs extraction on the blocking pool. Document parsers are CPU-bound and may
/// panic on hostile input; a panic is reported as `ExtractionError::Crashed`.
pub async fn extract_text_blocking(
    bytes: Bytes,
    content_type: Option<String>,
) -> Result<String, ExtractionError> {
    let kind = DocumentKind::from_mime(content_type.as_deref());
    tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| ExtractionError::Crashed(e.to_string()))?
}
