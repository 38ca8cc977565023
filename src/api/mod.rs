//! HTTP client for the CareerCoach backend.
//!
//! Wraps the four backend endpoints behind the [`AgentApi`] trait so the
//! conversation, PDP, and feedback controllers can be tested without a
//! network:
//!
//! - `POST /agent/query` - submit a chat message
//! - `POST /agent/cancel/{thread_id}` - best-effort cancellation signal
//! - `POST /agent/feedback` - feedback via query parameters
//! - `POST /pdp-generator` - multipart CV upload, binary document response
//!
//! Query submission is cancellable: the caller passes a
//! [`CancellationToken`] and a cancelled call resolves to
//! [`ApiError::Cancelled`] instead of a transport error.

mod types;

pub use types::{
    content_disposition_filename, FeedbackAck, PdpDocument, PdpUpload, QueryRequest, QueryResponse,
};

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// API call failures, per user-visible category.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// Connection, timeout, or protocol-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// The server answered 2xx but the body was not what we expected.
    #[error("unexpected response: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Server-provided detail, when one was reported.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// JSON error body used by the backend (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Backend API surface.
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Submit a chat query. Resolves to [`ApiError::Cancelled`] if the token
    /// is cancelled before the response arrives.
    async fn query(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, ApiError>;

    /// Notify the backend that the query on `thread_id` should stop.
    /// The response body is ignored.
    async fn cancel(&self, thread_id: &str) -> Result<(), ApiError>;

    /// Submit user feedback.
    async fn send_feedback(&self, contact: &str, feedback: &str) -> Result<FeedbackAck, ApiError>;

    /// Upload a CV and metadata, returning the generated document.
    async fn generate_pdp(&self, upload: PdpUpload) -> Result<PdpDocument, ApiError>;
}

/// HTTP implementation of [`AgentApi`].
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    /// Create a client for the given base URL. A trailing slash is stripped
    /// so endpoint paths can be joined uniformly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a non-success response into [`ApiError::Server`], preferring
    /// the backend's `{"detail": ...}` body over the raw text.
    async fn server_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.detail,
            Err(_) if !text.trim().is_empty() => text.trim().to_string(),
            Err(_) => format!("HTTP {}", status),
        };
        ApiError::Server { status, detail }
    }
}

#[async_trait]
impl AgentApi for AgentClient {
    async fn query(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, ApiError> {
        let url = self.endpoint("/agent/query");
        debug!(url = %url, thread_id = ?request.thread_id, "sending query");

        let call = async {
            let response = self.http.post(&url).json(request).send().await?;
            if !response.status().is_success() {
                return Err(Self::server_error(response).await);
            }
            let parsed: QueryResponse = response.json().await?;
            Ok(parsed)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("query cancelled before completion");
                Err(ApiError::Cancelled)
            }
            result = call => result,
        }
    }

    async fn cancel(&self, thread_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/agent/cancel/{}", thread_id));
        debug!(url = %url, "sending cancel signal");

        let response = self.http.post(&url).send().await?;
        if !response.status().is_success() {
            // Best-effort endpoint. Callers swallow this, but surface it so
            // they can log it.
            warn!(status = %response.status(), "cancel signal rejected");
            return Err(Self::server_error(response).await);
        }
        Ok(())
    }

    async fn send_feedback(&self, contact: &str, feedback: &str) -> Result<FeedbackAck, ApiError> {
        let url = self.endpoint("/agent/feedback");
        debug!(url = %url, "submitting feedback");

        let response = self
            .http
            .post(&url)
            .query(&[("contact", contact), ("feedback", feedback)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        let ack: FeedbackAck = response.json().await?;
        Ok(ack)
    }

    async fn generate_pdp(&self, upload: PdpUpload) -> Result<PdpDocument, ApiError> {
        let url = self.endpoint("/pdp-generator");
        debug!(url = %url, file = %upload.cv_file_name, "uploading CV");

        let file_part = Part::bytes(upload.cv_bytes)
            .file_name(upload.cv_file_name)
            .mime_str("application/pdf")
            .map_err(|e| ApiError::Invalid(format!("invalid CV mime type: {}", e)))?;
        let form = Form::new()
            .part("file", file_part)
            .text("career_goal", upload.career_goal)
            .text("additional_context", upload.additional_context)
            .text("target_date", upload.target_date);

        let response = self.http.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename);
        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(ApiError::Invalid("empty document body".to_string()));
        }

        Ok(PdpDocument { filename, bytes })
    }
}
