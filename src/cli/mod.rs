//! Terminal interface: reedline REPL, slash commands, and dialoguer forms.

pub mod completion_reedline;
pub mod forms;
pub mod repl;
pub mod runner;

pub use repl::Repl;
pub use runner::{run_interactive, run_single_prompt};
