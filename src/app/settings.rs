//! Runtime settings: parse/write `settings.conf`.
//!
//! The file uses the same `key = value` layout as the theme and keybinding
//! files. Missing keys keep their defaults; invalid values are skipped.

use std::path::Path;
use std::time::Duration;

use crate::debounce::DEFAULT_DELAY;
use crate::github::client::DEFAULT_API_BASE;
use crate::search::DEFAULT_SUGGESTION_LIMIT;

/// Tunables of both flows and the API endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Root of the GitHub REST API.
    pub api_base: String,
    /// Settle interval of the search input.
    pub debounce: Duration,
    /// How many results the suggestions view shows.
    pub suggestion_limit: usize,
    /// Drop responses that belong to a superseded request.
    pub discard_stale_responses: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce: DEFAULT_DELAY,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            discard_stale_responses: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or write the defaults there if it does not exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let settings = Self::default();
        if let Err(e) = settings.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default settings");
        }
        settings
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse `key = value` lines over the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }

            match lhs {
                "api_base" => cfg.api_base = rhs.trim_end_matches('/').to_string(),
                "debounce_ms" => {
                    if let Ok(ms) = rhs.parse::<u64>() {
                        cfg.debounce = Duration::from_millis(ms);
                    }
                }
                "suggestion_limit" => {
                    if let Ok(n) = rhs.parse::<usize>() {
                        cfg.suggestion_limit = n;
                    }
                }
                "discard_stale_responses" => {
                    if let Some(b) = parse_bool(rhs) {
                        cfg.discard_stale_responses = b;
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut buf = String::new();
        buf.push_str("# ghfinder settings\n");
        buf.push_str("# Root of the GitHub REST API\n");
        let _ = writeln!(&mut buf, "api_base = {}", self.api_base);
        buf.push_str("# Search input settle interval in milliseconds\n");
        let _ = writeln!(&mut buf, "debounce_ms = {}", self.debounce.as_millis());
        buf.push_str("# Number of search results shown as suggestions\n");
        let _ = writeln!(&mut buf, "suggestion_limit = {}", self.suggestion_limit);
        buf.push_str("# Ignore responses of superseded requests (true/false)\n");
        let _ = writeln!(
            &mut buf,
            "discard_stale_responses = {}",
            self.discard_stale_responses
        );
        std::fs::write(path, buf)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
