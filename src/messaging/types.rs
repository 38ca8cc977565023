//! Message types for UI output.

use serde::{Deserialize, Serialize};

/// Message levels for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A plain status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// An assistant reply (markdown content) with an optional speaker label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// Any renderable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Text(TextMessage),
    Response(ResponseMessage),
    Divider,
    Clear,
}

impl Message {
    /// Create an info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Info,
            text: text.into(),
        })
    }

    /// Create a success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Success,
            text: text.into(),
        })
    }

    /// Create a warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Warning,
            text: text.into(),
        })
    }

    /// Create an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            level: MessageLevel::Error,
            text: text.into(),
        })
    }

    /// Create an assistant response without a speaker label.
    pub fn response(content: impl Into<String>) -> Self {
        Self::Response(ResponseMessage {
            content: content.into(),
            speaker: None,
        })
    }

    /// Create an assistant response attributed to a speaker.
    pub fn spoken_response(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Response(ResponseMessage {
            content: content.into(),
            speaker: Some(speaker.into()),
        })
    }
}
