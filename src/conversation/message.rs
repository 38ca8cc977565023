//! Chat transcript types.

use serde::{Deserialize, Serialize};

/// Greeting shown at the start of every conversation.
pub const WELCOME_MESSAGE: &str = "Hello! I'm CareerCoach AI, your personal career development \
                                   assistant. How can I help you today?";

/// Display name for the assistant.
pub const ASSISTANT_NAME: &str = "CareerCoach AI";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Thread the message belongs to, once the server has assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            thread_id: None,
        }
    }

    /// Create an assistant message outside any thread (welcome, notices).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            thread_id: None,
        }
    }

    /// Create an assistant message tied to a server thread.
    pub fn assistant_in_thread(content: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            thread_id: Some(thread_id.into()),
        }
    }

    /// The welcome message every conversation starts with.
    pub fn welcome() -> Self {
        Self::assistant(WELCOME_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = ChatMessage::user("What skills should I learn?");
        assert_eq!(msg.role, ChatRole::User);
        assert!(msg.thread_id.is_none());
    }

    #[test]
    fn test_assistant_in_thread() {
        let msg = ChatMessage::assistant_in_thread("Learn Rust.", "t-7");
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.thread_id.as_deref(), Some("t-7"));
    }

    #[test]
    fn test_welcome_is_assistant_without_thread() {
        let msg = ChatMessage::welcome();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.content, WELCOME_MESSAGE);
        assert!(msg.thread_id.is_none());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert!(json.get("thread_id").is_none());
    }
}
