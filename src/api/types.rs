//! Request and response types for the CareerCoach backend API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body for `POST /agent/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's message.
    pub query: String,
    /// Server-assigned conversation identifier, absent on the first exchange.
    pub thread_id: Option<String>,
    /// Extra context for the agent. Always sent, currently empty.
    pub context: Map<String, Value>,
}

impl QueryRequest {
    /// Build a query carrying the current thread, with empty context.
    pub fn new(query: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            thread_id,
            context: Map::new(),
        }
    }
}

/// Response from `POST /agent/query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    pub thread_id: String,
    pub response: String,
    /// Full agent reasoning trace, when the backend exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_thought_process: Option<String>,
}

/// Acknowledgment from `POST /agent/feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub status: String,
    pub message: String,
}

/// Multipart payload for `POST /pdp-generator`.
#[derive(Debug, Clone)]
pub struct PdpUpload {
    /// CV file contents.
    pub cv_bytes: Vec<u8>,
    /// Original file name, sent as the multipart part file name.
    pub cv_file_name: String,
    pub career_goal: String,
    pub additional_context: String,
    /// Target date as `YYYY-MM-DD`.
    pub target_date: String,
}

/// Generated document returned by `POST /pdp-generator`.
#[derive(Debug, Clone)]
pub struct PdpDocument {
    /// File name extracted from the `Content-Disposition` header, if any.
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Extract the `filename` parameter from a `Content-Disposition` header value.
///
/// Handles both quoted (`attachment; filename="plan.pdf"`) and unquoted
/// (`attachment; filename=plan.pdf`) forms. Returns `None` when the header
/// has no filename parameter or it is empty.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("filename=") {
            let name = value.trim().trim_matches('"').trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}
