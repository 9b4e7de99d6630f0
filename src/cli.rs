//! Command-line interface.
//!
//! Flags override `settings.conf`; each one can also come from the environment.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::settings::Settings;

#[derive(Parser, Debug, Default)]
#[command(
    name = "ghfinder",
    version,
    about = "Look up GitHub profiles and search GitHub users from the terminal"
)]
pub struct Cli {
    /// Username to look up right away
    pub username: Option<String>,

    /// Start on the search tab with this query
    #[arg(long, conflicts_with = "username")]
    pub query: Option<String>,

    /// Root of the GitHub REST API
    #[arg(long, env = "GHFINDER_API_BASE")]
    pub api_base: Option<String>,

    /// Search input settle interval in milliseconds
    #[arg(long, env = "GHFINDER_DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    /// Directory holding settings.conf, theme.conf and keybinds.conf
    #[arg(long, env = "GHFINDER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Where to write logs (default: ghfinder.log in the config directory)
    #[arg(long, env = "GHFINDER_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line values over file settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(base) = &self.api_base {
            settings.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(ms) = self.debounce_ms {
            settings.debounce = Duration::from_millis(ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from(["ghfinder", "--api-base", "http://127.0.0.1:1/", "--debounce-ms", "50"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.api_base, "http://127.0.0.1:1");
        assert_eq!(settings.debounce, Duration::from_millis(50));
    }

    #[test]
    fn username_and_query_conflict() {
        assert!(Cli::try_parse_from(["ghfinder", "octocat", "--query", "oct"]).is_err());
        let cli = Cli::parse_from(["ghfinder", "octocat"]);
        assert_eq!(cli.username.as_deref(), Some("octocat"));
    }
}
