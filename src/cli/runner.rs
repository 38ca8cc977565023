//! CLI runner for interactive and single-prompt modes.

use crate::api::AgentClient;
use crate::cli::repl::Repl;
use crate::config::Settings;
use crate::conversation::Conversation;
use crate::telemetry::{LogTracker, SharedTracker};
use std::sync::Arc;

fn build_repl(settings: Settings) -> Repl {
    let api: Arc<AgentClient> = Arc::new(AgentClient::new(&settings.api_url));
    let tracker: SharedTracker = Arc::new(LogTracker);
    let conversation = Arc::new(Conversation::new(api.clone(), tracker.clone()));
    Repl::new(conversation, api, settings, tracker)
}

/// Run a single prompt and exit.
pub async fn run_single_prompt(settings: Settings, prompt: &str) -> anyhow::Result<()> {
    let mut repl = build_repl(settings);
    repl.handle_prompt(prompt).await?;
    Ok(())
}

/// Run in interactive mode.
pub async fn run_interactive(settings: Settings) -> anyhow::Result<()> {
    print_banner();

    let mut repl = build_repl(settings);
    repl.run().await?;

    Ok(())
}

/// Print the welcome banner.
///
/// This is public for testing purposes.
pub fn print_banner() {
    println!();
    println!("  \x1b[1;36m╔═╗╔═╗╔═╗╔═╗╦ ╦\x1b[0m");
    println!("  \x1b[1;36m║  ║ ║╠═╣║  ╠═╣\x1b[0m");
    println!(
        "  \x1b[1;36m╚═╝╚═╝╩ ╩╚═╝╩ ╩\x1b[0m  \x1b[2mv{}\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  \x1b[2m🎯 CareerCoach AI - your personal career development assistant\x1b[0m");
    println!(
        "  \x1b[2mType \x1b[0m\x1b[1;36m/help\x1b[0m\x1b[2m for commands, or start chatting!\x1b[0m"
    );
    println!();
}

/// Get the application version string.
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Generate the banner text lines without ANSI codes (for testing).
pub fn banner_text_lines() -> Vec<&'static str> {
    vec![
        "╔═╗╔═╗╔═╗╔═╗╦ ╦",
        "║  ║ ║╠═╣║  ╠═╣",
        "╚═╝╚═╝╩ ╩╚═╝╩ ╩",
        "CareerCoach AI",
        "/help",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Version Tests
    // =========================================================================

    #[test]
    fn test_get_version_not_empty() {
        assert!(!get_version().is_empty());
    }

    #[test]
    fn test_get_version_format() {
        let version = get_version();
        let parts: Vec<&str> = version.split('.').collect();
        assert!(
            parts.len() >= 2,
            "Version should have at least major.minor: {}",
            version
        );
        for part in &parts[..2] {
            let num: Result<u32, _> = part.parse();
            assert!(num.is_ok(), "Version part should be numeric: {}", part);
        }
    }

    // =========================================================================
    // Banner Text Tests
    // =========================================================================

    #[test]
    fn test_banner_text_lines_not_empty() {
        assert!(!banner_text_lines().is_empty());
    }

    #[test]
    fn test_banner_text_contains_assistant_name() {
        let lines = banner_text_lines();
        assert!(lines.iter().any(|l| l.contains("CareerCoach")));
    }

    #[test]
    fn test_banner_text_contains_help_hint() {
        let lines = banner_text_lines();
        assert!(lines.iter().any(|l| l.contains("/help")));
    }
}
