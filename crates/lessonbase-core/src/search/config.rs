//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::{SearchError, SearchResult};
use super::snippet::DEFAULT_SNIPPET_MARGIN;

const CONFIG_FILE: &str = "config.toml";

/// Main search configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search behavior configuration
    #[serde(default)]
    pub search: SearchBehaviorConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBehaviorConfig {
    /// Characters of context kept on each side of a match
    #[serde(default = "default_snippet_margin")]
    pub snippet_margin: usize,

    /// Per-query store timeout in milliseconds (0 disables the timeout)
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for SearchBehaviorConfig {
    fn default() -> Self {
        Self {
            snippet_margin: default_snippet_margin(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl SearchBehaviorConfig {
    pub fn query_timeout(&self) -> Option<Duration> {
        if self.query_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.query_timeout_ms))
        }
    }
}

fn default_snippet_margin() -> usize {
    DEFAULT_SNIPPET_MARGIN
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

impl SearchConfig {
    /// Load configuration from file and environment
    /// Priority: environment variables > config.toml > defaults
    pub fn load() -> SearchResult<Self> {
        Self::load_in(&Self::config_dir())
    }

    /// Same as [`SearchConfig::load`], reading `config.toml` from `dir`
    pub fn load_in(dir: &Path) -> SearchResult<Self> {
        let mut config = Self::default();

        let toml_path = dir.join(CONFIG_FILE);
        if toml_path.exists() {
            let content = std::fs::read_to_string(&toml_path)?;
            config = toml::from_str::<SearchConfig>(&content).map_err(|e| {
                SearchError::Config(format!("{}: {}", toml_path.display(), e))
            })?;
        }

        if let Ok(margin) = std::env::var("LESSONBASE_SNIPPET_MARGIN") {
            config.search.snippet_margin = parse_env("LESSONBASE_SNIPPET_MARGIN", &margin)?;
        }
        if let Ok(timeout) = std::env::var("LESSONBASE_QUERY_TIMEOUT_MS") {
            config.search.query_timeout_ms = parse_env("LESSONBASE_QUERY_TIMEOUT_MS", &timeout)?;
        }

        Ok(config)
    }

    /// Get base config directory
    fn config_dir() -> PathBuf {
        if let Ok(root) = std::env::var("LESSONBASE_ROOT") {
            return PathBuf::from(root);
        }

        dirs::home_dir()
            .map(|h| h.join(".lessonbase"))
            .unwrap_or_else(|| PathBuf::from(".lessonbase"))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> SearchResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SearchError::Config(format!("{key} has an invalid value \"{value}\"")))
}
