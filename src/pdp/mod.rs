//! Personal Development Plan generation.
//!
//! Collects a CV file plus goal metadata, validates everything client-side,
//! uploads it as multipart form data, and saves the generated document.
//! The conversation transcript gets an optimistic "generating" notice that
//! is replaced, exactly once, by either a success summary or an error.

use crate::api::{AgentApi, ApiError, PdpUpload};
use crate::conversation::Conversation;
use crate::telemetry::{Tracker, EVENT_PDP_SUBMITTED};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name used when the response has no usable `Content-Disposition`.
pub const DEFAULT_DOCUMENT_NAME: &str = "personal_development_plan.pdf";

/// Placeholder notice shown while the document is being generated.
pub const GENERATING_MESSAGE: &str =
    "Generating your Personal Development Plan... This can take a moment.";

/// Fallback error text when the server gives no detail.
pub const GENERIC_PDP_ERROR: &str = "Something went wrong while generating your plan.";

/// PDP generation failures.
#[derive(Debug, thiserror::Error)]
pub enum PdpError {
    /// The form was rejected client-side; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// Reading the CV or writing the document failed.
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One PDP submission. Transient; exists only for the duration of the flow.
#[derive(Debug, Clone)]
pub struct PdpForm {
    /// Path to the CV file (PDF).
    pub cv_path: PathBuf,
    pub career_goal: String,
    pub additional_context: String,
    /// Target date as `YYYY-MM-DD`.
    pub target_date: String,
}

impl PdpForm {
    /// Validate the form against today's date.
    pub fn validate(&self) -> Result<(), PdpError> {
        self.validate_at(Local::now().date_naive())
    }

    /// Validation with an explicit "today", so tests are date-independent.
    fn validate_at(&self, today: NaiveDate) -> Result<(), PdpError> {
        if self.cv_path.as_os_str().is_empty() {
            return Err(PdpError::Validation("Please select a CV file".to_string()));
        }
        if !self.cv_path.is_file() {
            return Err(PdpError::Validation(format!(
                "CV file not found: {}",
                self.cv_path.display()
            )));
        }
        let is_pdf = self
            .cv_path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(PdpError::Validation("Please select a PDF file".to_string()));
        }

        if self.career_goal.trim().is_empty() {
            return Err(PdpError::Validation(
                "Please set your career goal".to_string(),
            ));
        }

        if self.target_date.trim().is_empty() {
            return Err(PdpError::Validation(
                "Please set a target date".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(self.target_date.trim(), "%Y-%m-%d").map_err(|_| {
            PdpError::Validation("Target date must be in YYYY-MM-DD format".to_string())
        })?;
        if date < today {
            return Err(PdpError::Validation(
                "Target date must not be in the past".to_string(),
            ));
        }

        Ok(())
    }

    fn cv_file_name(&self) -> String {
        self.cv_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv.pdf".to_string())
    }
}

/// Run the full generation flow.
///
/// Validation failures and CV read errors return before any transcript or
/// network activity. After that, a generating notice is appended and is
/// replaced by exactly one result message. On success the document is
/// written to `download_dir` and its path returned.
pub async fn generate_plan(
    api: &dyn AgentApi,
    conversation: &Conversation,
    form: &PdpForm,
    download_dir: &Path,
    tracker: &dyn Tracker,
) -> Result<PathBuf, PdpError> {
    form.validate()?;

    let cv_bytes = tokio::fs::read(&form.cv_path).await?;
    debug!(
        cv = %form.cv_path.display(),
        size = cv_bytes.len(),
        "CV loaded for upload"
    );

    tracker.track(
        EVENT_PDP_SUBMITTED,
        &[("target_date", form.target_date.trim())],
    );

    let upload = PdpUpload {
        cv_bytes,
        cv_file_name: form.cv_file_name(),
        career_goal: form.career_goal.trim().to_string(),
        additional_context: form.additional_context.trim().to_string(),
        target_date: form.target_date.trim().to_string(),
    };

    let placeholder = conversation.append_notice(GENERATING_MESSAGE);

    match upload_and_save(api, upload, download_dir).await {
        Ok(path) => {
            info!(path = %path.display(), "plan saved");
            conversation.replace_message(
                placeholder,
                format!(
                    "Your Personal Development Plan is ready! Saved to {}",
                    path.display()
                ),
            );
            Ok(path)
        }
        Err(err) => {
            let detail = match &err {
                PdpError::Api(api_err) => api_err
                    .server_detail()
                    .unwrap_or(GENERIC_PDP_ERROR)
                    .to_string(),
                other => other.to_string(),
            };
            conversation.replace_message(
                placeholder,
                format!("Failed to generate your plan: {}", detail),
            );
            Err(err)
        }
    }
}

/// Reduce a server-supplied filename to its final path component so the
/// document always lands inside the download directory.
fn safe_document_name(filename: Option<&str>) -> String {
    filename
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string())
}

async fn upload_and_save(
    api: &dyn AgentApi,
    upload: PdpUpload,
    download_dir: &Path,
) -> Result<PathBuf, PdpError> {
    let document = api.generate_pdp(upload).await?;
    let filename = safe_document_name(document.filename.as_deref());

    tokio::fs::create_dir_all(download_dir).await?;
    let path = download_dir.join(filename);
    tokio::fs::write(&path, &document.bytes).await?;
    Ok(path)
}
