//! Terminal renderer for chat output with light markdown support.

use super::{Message, MessageLevel};
use crossterm::{
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    ExecutableCommand,
};
use std::io::stdout;

/// Render style configuration.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub info_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
    pub error_color: Color,
    pub speaker_color: Color,
    pub code_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            info_color: Color::White,
            success_color: Color::Green,
            warning_color: Color::Yellow,
            error_color: Color::Red,
            speaker_color: Color::Magenta,
            code_color: Color::Cyan,
        }
    }
}

/// Terminal renderer for messages.
pub struct TerminalRenderer {
    style: RenderStyle,
}

impl TerminalRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self {
            style: RenderStyle::default(),
        }
    }

    /// Create with custom style.
    pub fn with_style(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Render a message to the terminal.
    pub fn render(&self, message: &Message) -> std::io::Result<()> {
        match message {
            Message::Text(text) => self.render_text(text.level, &text.text),
            Message::Response(resp) => {
                if let Some(speaker) = &resp.speaker {
                    self.render_speaker(speaker)?;
                }
                self.render_markdown(&resp.content)
            }
            Message::Divider => self.render_divider(),
            Message::Clear => self.clear_screen(),
        }
    }

    fn render_text(&self, level: MessageLevel, text: &str) -> std::io::Result<()> {
        let color = match level {
            MessageLevel::Info => self.style.info_color,
            MessageLevel::Success => self.style.success_color,
            MessageLevel::Warning => self.style.warning_color,
            MessageLevel::Error => self.style.error_color,
        };

        let prefix = match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Info => "",
        };

        stdout()
            .execute(SetForegroundColor(color))?
            .execute(Print(prefix))?
            .execute(Print(text))?
            .execute(Print("\n"))?
            .execute(ResetColor)?;

        Ok(())
    }

    fn render_speaker(&self, speaker: &str) -> std::io::Result<()> {
        stdout()
            .execute(SetForegroundColor(self.style.speaker_color))?
            .execute(SetAttribute(Attribute::Bold))?
            .execute(Print(speaker))?
            .execute(Print(":"))?
            .execute(SetAttribute(Attribute::Reset))?
            .execute(Print("\n"))?
            .execute(ResetColor)?;
        Ok(())
    }

    /// Render markdown content with basic formatting.
    pub fn render_markdown(&self, content: &str) -> std::io::Result<()> {
        let mut in_code_block = false;

        for line in content.lines() {
            if line.starts_with("```") {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                stdout()
                    .execute(SetForegroundColor(self.style.code_color))?
                    .execute(Print("  "))?
                    .execute(Print(line))?
                    .execute(Print("\n"))?
                    .execute(ResetColor)?;
            } else {
                self.render_markdown_line(line)?;
            }
        }

        Ok(())
    }

    /// Render a single line of markdown.
    fn render_markdown_line(&self, line: &str) -> std::io::Result<()> {
        let mut stdout = stdout();

        // Headers
        for prefix in ["### ", "## ", "# "] {
            if let Some(rest) = line.strip_prefix(prefix) {
                stdout
                    .execute(SetForegroundColor(Color::Cyan))?
                    .execute(SetAttribute(Attribute::Bold))?
                    .execute(Print(rest))?
                    .execute(SetAttribute(Attribute::Reset))?
                    .execute(Print("\n"))?
                    .execute(ResetColor)?;
                return Ok(());
            }
        }

        // Bullet points
        if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            stdout
                .execute(Print("  • "))?
                .execute(Print(rest))?
                .execute(Print("\n"))?;
            return Ok(());
        }

        stdout.execute(Print(line))?.execute(Print("\n"))?;
        Ok(())
    }

    fn render_divider(&self) -> std::io::Result<()> {
        stdout()
            .execute(SetForegroundColor(Color::DarkGrey))?
            .execute(Print("─".repeat(50)))?
            .execute(Print("\n"))?
            .execute(ResetColor)?;
        Ok(())
    }

    fn clear_screen(&self) -> std::io::Result<()> {
        stdout()
            .execute(crossterm::terminal::Clear(
                crossterm::terminal::ClearType::All,
            ))?
            .execute(crossterm::cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
