//! XDG Base Directory support.

use std::path::PathBuf;

/// XDG directory paths for CareerCoach.
pub struct XdgDirs {
    /// Config directory (~/.config/careercoach or XDG_CONFIG_HOME/careercoach)
    pub config: PathBuf,
    /// Data directory (~/.local/share/careercoach or XDG_DATA_HOME/careercoach)
    pub data: PathBuf,
    /// State directory (~/.local/state/careercoach or XDG_STATE_HOME/careercoach)
    pub state: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            config: std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".config"))
                .join("careercoach"),
            data: std::env::var("XDG_DATA_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/share"))
                .join("careercoach"),
            state: std::env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".local/state"))
                .join("careercoach"),
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.config, &self.data, &self.state] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// REPL history file location.
    pub fn history_file(&self) -> PathBuf {
        self.state.join("history.txt")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
