//! CareerCoach Library
//!
//! This crate provides the core functionality for the CareerCoach CLI, a
//! terminal client for the CareerCoach AI career development assistant.
//!
//! ## Main Components
//!
//! - [`api`] - HTTP client for the agent backend (query, cancel, feedback, PDP)
//! - [`cli`] - Command-line interface (REPL, commands, forms, runner)
//! - [`config`] - Runtime settings and XDG directories
//! - [`conversation`] - Transcript, thread identity, and request lifecycle
//! - [`feedback`] - Feedback submission flow
//! - [`messaging`] - Terminal rendering and activity spinner
//! - [`pdp`] - Personal Development Plan generation flow
//! - [`telemetry`] - Pluggable usage event tracking

pub mod api;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod feedback;
pub mod messaging;
pub mod pdp;
pub mod telemetry;

// Re-export commonly used types
pub use api::{AgentApi, AgentClient, ApiError, QueryRequest, QueryResponse, DEFAULT_API_URL};
pub use cli::{run_interactive, run_single_prompt, Repl};
pub use config::{Settings, XdgDirs, API_URL_ENV};
pub use conversation::{
    ChatMessage, ChatRole, Conversation, SendOutcome, ASSISTANT_NAME, WELCOME_MESSAGE,
};
pub use feedback::{Feedback, FeedbackError};
pub use messaging::{Message, Spinner, SpinnerHandle, TerminalRenderer};
pub use pdp::{PdpError, PdpForm};
pub use telemetry::{LogTracker, NoopTracker, SharedTracker, Tracker};
