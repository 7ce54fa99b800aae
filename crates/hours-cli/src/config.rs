//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where the PDF report is written.
    pub output_path: PathBuf,
    /// Tags passed to `timew export`. Empty means every interval.
    pub tags: Vec<String>,
    /// The Timewarrior binary.
    pub timew_binary: PathBuf,
    /// Seconds to wait for `timew export`.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: std::env::temp_dir().join("hours-report.pdf"),
            tags: Vec::new(),
            timew_binary: PathBuf::from(hours_timew::DEFAULT_BINARY),
            timeout_secs: hours_timew::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // HOURS_OUTPUT_PATH, HOURS_TAGS, ...
        figment = figment.merge(Env::prefixed("HOURS_"));

        figment.extract()
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Returns the platform-specific config directory for hours.
///
/// On Linux: `~/.config/hours`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hours"))
}
