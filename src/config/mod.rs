//! Client configuration.
//!
//! Everything the client needs at runtime: where the backend lives and
//! where generated documents are saved. Values come from CLI flags, the
//! environment, and sensible defaults, in that order.

mod xdg;

pub use xdg::XdgDirs;

use crate::api::DEFAULT_API_URL;
use std::path::PathBuf;

/// Environment variable overriding the backend address.
pub const API_URL_ENV: &str = "COACH_API_URL";

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend base URL.
    pub api_url: String,
    /// Directory where generated PDP documents are written.
    pub download_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from optional CLI overrides.
    ///
    /// The API URL falls back to `COACH_API_URL`, then the default. The
    /// download directory falls back to the platform downloads folder, then
    /// the current directory.
    pub fn resolve(api_url: Option<String>, download_dir: Option<PathBuf>) -> Self {
        let api_url = api_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let download_dir = download_dir
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            api_url,
            download_dir,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
