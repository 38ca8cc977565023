//! Interactive REPL for the CareerCoach client.
//!
//! Reedline-powered loop with slash commands, tab completion, and persistent
//! history. A send in progress can be interrupted with Ctrl+C, which cancels
//! the in-flight request instead of killing the process.

use super::completion_reedline::{create_reedline, CoachCompleter, CoachPrompt, COMMANDS};
use super::forms;
use crate::api::AgentApi;
use crate::config::{Settings, XdgDirs};
use crate::conversation::{ChatRole, Conversation, SendOutcome, ASSISTANT_NAME};
use crate::feedback;
use crate::messaging::{Message, Spinner, TerminalRenderer};
use crate::pdp::{self, PdpError};
use crate::telemetry::SharedTracker;
use reedline::{FileBackedHistory, Signal};
use std::sync::Arc;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The interactive session.
pub struct Repl {
    conversation: Arc<Conversation>,
    api: Arc<dyn AgentApi>,
    renderer: TerminalRenderer,
    settings: Settings,
    tracker: SharedTracker,
}

impl Repl {
    pub fn new(
        conversation: Arc<Conversation>,
        api: Arc<dyn AgentApi>,
        settings: Settings,
        tracker: SharedTracker,
    ) -> Self {
        Self {
            conversation,
            api,
            renderer: TerminalRenderer::new(),
            settings,
            tracker,
        }
    }

    /// Run the REPL until the user exits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut line_editor = create_reedline(CoachCompleter::new());

        let dirs = XdgDirs::new();
        match dirs.ensure_dirs() {
            Ok(()) => {
                match FileBackedHistory::with_file(HISTORY_CAPACITY, dirs.history_file()) {
                    Ok(history) => {
                        line_editor = line_editor.with_history(Box::new(history));
                    }
                    Err(err) => warn!(error = %err, "history unavailable, continuing without"),
                }
            }
            Err(err) => warn!(error = %err, "could not create state directories"),
        }

        let prompt = CoachPrompt::new(ASSISTANT_NAME);

        self.renderer
            .render(&Message::spoken_response(ASSISTANT_NAME, crate::conversation::WELCOME_MESSAGE))?;
        self.renderer.render(&Message::info(
            "Type a message, or /help for commands. Tab completes commands.",
        ))?;
        self.renderer.render(&Message::Divider)?;

        loop {
            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.starts_with('/') {
                        if self.handle_command(line).await? == Flow::Exit {
                            break;
                        }
                    } else {
                        self.handle_prompt(line).await?;
                    }
                }
                Ok(Signal::CtrlC) => {
                    self.renderer
                        .render(&Message::info("Use /exit or Ctrl+D to quit."))?;
                }
                Ok(Signal::CtrlD) => break,
                Err(err) => {
                    warn!(error = %err, "read_line failed");
                    break;
                }
            }
        }

        self.renderer.render(&Message::info("Goodbye!"))?;
        Ok(())
    }

    /// Send one user message and render the outcome.
    ///
    /// While the request is in flight, Ctrl+C cancels it rather than the
    /// process. The select loop keeps polling the pinned send future so the
    /// cancelled outcome still arrives through the normal path.
    pub async fn handle_prompt(&mut self, text: &str) -> anyhow::Result<()> {
        let spinner = Spinner::new().start("Thinking...");

        let send = self.conversation.send_message(text);
        tokio::pin!(send);

        let outcome = loop {
            tokio::select! {
                outcome = &mut send => break outcome,
                _ = tokio::signal::ctrl_c() => {
                    debug!("ctrl-c during send, cancelling request");
                    self.conversation.cancel_request().await;
                }
            }
        };

        spinner.stop().await;
        self.render_outcome(&outcome)?;
        Ok(())
    }

    fn render_outcome(&self, outcome: &SendOutcome) -> std::io::Result<()> {
        match outcome {
            SendOutcome::Completed { reply } => self
                .renderer
                .render(&Message::spoken_response(ASSISTANT_NAME, reply.as_str())),
            SendOutcome::Failed { message } => {
                self.renderer.render(&Message::error(message.as_str()))
            }
            SendOutcome::Cancelled { notice } => {
                self.renderer.render(&Message::warning(notice.as_str()))
            }
            SendOutcome::Rejected => self
                .renderer
                .render(&Message::warning("A request is already in progress.")),
        }
    }

    async fn handle_command(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = line.split_whitespace().next().unwrap_or(line);
        match command {
            "/help" | "/h" => {
                self.show_help()?;
            }
            "/new" => {
                self.conversation.clear_chat();
                self.renderer
                    .render(&Message::success("Started a new conversation."))?;
                self.renderer
                    .render(&Message::spoken_response(
                        ASSISTANT_NAME,
                        crate::conversation::WELCOME_MESSAGE,
                    ))?;
            }
            "/history" => {
                self.show_history()?;
            }
            "/clear" => {
                self.renderer.render(&Message::Clear)?;
            }
            "/pdp" => {
                self.run_pdp().await?;
            }
            "/feedback" => {
                self.run_feedback().await?;
            }
            "/exit" | "/quit" | "/q" => return Ok(Flow::Exit),
            unknown => {
                self.renderer.render(&Message::warning(format!(
                    "Unknown command: {}. Try /help.",
                    unknown
                )))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_help(&self) -> std::io::Result<()> {
        self.renderer.render(&Message::response("## Commands"))?;
        for (cmd, desc) in COMMANDS {
            self.renderer
                .render(&Message::info(format!("  {:<12} {}", cmd, desc)))?;
        }
        self.renderer.render(&Message::info(
            "  Ctrl+C during a reply cancels the request.",
        ))
    }

    fn show_history(&self) -> std::io::Result<()> {
        self.renderer.render(&Message::Divider)?;
        for message in self.conversation.messages() {
            let speaker = match message.role {
                ChatRole::User => "You",
                ChatRole::Assistant => ASSISTANT_NAME,
            };
            self.renderer
                .render(&Message::spoken_response(speaker, &message.content))?;
        }
        self.renderer.render(&Message::Divider)
    }

    async fn run_pdp(&mut self) -> anyhow::Result<()> {
        let Some(form) = forms::pdp_form()? else {
            self.renderer.render(&Message::info("Cancelled."))?;
            return Ok(());
        };

        let spinner = Spinner::new().start("Generating your plan...");
        let result = pdp::generate_plan(
            self.api.as_ref(),
            &self.conversation,
            &form,
            &self.settings.download_dir,
            self.tracker.as_ref(),
        )
        .await;
        spinner.stop().await;

        match result {
            Ok(path) => {
                self.renderer.render(&Message::success(format!(
                    "Your Personal Development Plan is ready! Saved to {}",
                    path.display()
                )))?;
            }
            Err(PdpError::Validation(message)) => {
                self.renderer.render(&Message::warning(message))?;
            }
            Err(err) => {
                // The transcript already holds the user-facing error text.
                let detail = self
                    .conversation
                    .messages()
                    .last()
                    .map(|message| message.content.clone())
                    .unwrap_or_else(|| err.to_string());
                self.renderer.render(&Message::error(detail))?;
            }
        }
        Ok(())
    }

    async fn run_feedback(&mut self) -> anyhow::Result<()> {
        let Some(feedback) = forms::feedback_form()? else {
            self.renderer.render(&Message::info("Cancelled."))?;
            return Ok(());
        };

        let spinner = Spinner::new().start("Sending feedback...");
        let result = feedback::submit(self.api.as_ref(), &feedback, self.tracker.as_ref()).await;
        spinner.stop().await;

        match result {
            Ok(ack) => {
                self.renderer.render(&Message::success(ack.message))?;
            }
            Err(err) => {
                self.renderer
                    .render(&Message::error(format!("Could not send feedback: {}", err)))?;
            }
        }
        Ok(())
    }
}
