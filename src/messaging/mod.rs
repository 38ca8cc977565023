//! Terminal output for the chat UI.
//!
//! Provides:
//!
//! - [`Message`] types for user-visible output (status lines, assistant
//!   responses, dividers)
//! - [`TerminalRenderer`] for colored rendering with light markdown support
//! - [`Spinner`] for activity indication while a request is in flight

mod renderer;
mod spinner;
mod types;

pub use renderer::{RenderStyle, TerminalRenderer};
pub use spinner::{Spinner, SpinnerConfig, SpinnerHandle};
pub use types::{Message, MessageLevel, ResponseMessage, TextMessage};
