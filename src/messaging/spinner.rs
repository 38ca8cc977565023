//! Animated spinner for showing activity during backend calls.

use crossterm::{
    cursor::{Hide, MoveToColumn, Show},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner configuration.
#[derive(Clone)]
pub struct SpinnerConfig {
    /// Animation frames.
    pub frames: Vec<&'static str>,
    /// Frame duration in milliseconds.
    pub interval_ms: u64,
    /// Spinner color.
    pub color: Color,
    /// Whether to show elapsed seconds.
    pub show_elapsed: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            frames: SPINNER_FRAMES.to_vec(),
            interval_ms: 80,
            color: Color::Cyan,
            show_elapsed: true,
        }
    }
}

/// Handle for controlling a running spinner.
pub struct SpinnerHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Stop the spinner and clear its line.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        let mut stdout = stdout();
        let _ = stdout.execute(MoveToColumn(0));
        let _ = stdout.execute(Clear(ClearType::CurrentLine));
        let _ = stdout.execute(Show);
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
        // Ensure cursor is shown
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
    }
}

/// Spinner for showing activity.
pub struct Spinner {
    config: SpinnerConfig,
}

impl Spinner {
    /// Create a new spinner with default config.
    pub fn new() -> Self {
        Self {
            config: SpinnerConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: SpinnerConfig) -> Self {
        Self { config }
    }

    /// Start the spinner with a message.
    pub fn start(&self, message: impl Into<String>) -> SpinnerHandle {
        let config = self.config.clone();
        let message = message.into();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut frame_idx = 0;
            let started = Instant::now();
            let mut stdout = stdout();

            let _ = stdout.execute(Hide);

            loop {
                if *stop_rx.borrow() {
                    break;
                }

                let frame = config.frames[frame_idx % config.frames.len()];
                let elapsed = if config.show_elapsed {
                    format!(" ({}s)", started.elapsed().as_secs())
                } else {
                    String::new()
                };

                let _ = stdout.execute(MoveToColumn(0));
                let _ = stdout.execute(Clear(ClearType::CurrentLine));
                let _ = stdout.execute(SetForegroundColor(config.color));
                let _ = stdout.execute(Print(format!("{} {}{}", frame, message, elapsed)));
                let _ = stdout.execute(ResetColor);
                let _ = stdout.flush();

                frame_idx += 1;

                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(config.interval_ms)) => {}
                    _ = stop_rx.changed() => { break; }
                }
            }

            let _ = stdout.execute(Show);
        });

        SpinnerHandle {
            stop_tx,
            task: Some(task),
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_config_default() {
        let config = SpinnerConfig::default();
        assert_eq!(config.interval_ms, 80);
        assert!(config.show_elapsed);
        assert_eq!(config.color, Color::Cyan);
        assert_eq!(config.frames, SPINNER_FRAMES.to_vec());
    }

    #[test]
    fn test_spinner_config_custom() {
        let config = SpinnerConfig {
            frames: vec!["-", "\\", "|", "/"],
            interval_ms: 100,
            color: Color::Green,
            show_elapsed: false,
        };
        let spinner = Spinner::with_config(config);
        assert_eq!(spinner.config.frames.len(), 4);
        assert!(!spinner.config.show_elapsed);
    }

    #[tokio::test]
    async fn test_spinner_lifecycle() {
        let spinner = Spinner::new();
        let handle = spinner.start("Thinking...");

        tokio::time::sleep(Duration::from_millis(100)).await;

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_spinner_handle_drop() {
        let spinner = Spinner::new();
        {
            let handle = spinner.start("Drop test");
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(handle);
        }
        // If we get here without hanging, drop sent the stop signal
    }
}
