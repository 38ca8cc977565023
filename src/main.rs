//! CareerCoach - AI-powered career development assistant
//!
//! Terminal client with an interactive REPL (default) and a single-prompt mode.

use careercoach::cli;
use careercoach::config::{Settings, API_URL_ENV};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CareerCoach AI - your personal career development assistant 🎯
#[derive(Parser, Debug)]
#[command(name = "coach")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Backend API base URL
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Execute a single prompt and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Directory where generated PDP documents are saved
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        // Determine log level from args or env
        let default_filter = if args.verbose {
            "trace"
        } else if args.debug {
            "debug"
        } else {
            "warn" // Quiet by default for normal use
        };

        // Initialize tracing with stderr output
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        if args.debug || args.verbose {
            tracing::info!("Debug logging enabled");
        }

        let settings = Settings::resolve(args.api_url, args.download_dir);

        if let Some(prompt) = args.prompt {
            cli::run_single_prompt(settings, &prompt).await?;
        } else {
            cli::run_interactive(settings).await?;
        }

        Ok(())
    })
}
