// Runtime configuration

use crate::debounce::DEBOUNCE_MS;
use crate::truncate::DEFAULT_TRUNCATE_LEN;
use serde::{Deserialize, Serialize};
use std::env;

/// Playground settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Editor change quiescence window (ms)
    pub debounce_ms: u64,

    /// Display length for resource URLs
    pub truncate_len: usize,

    /// Timeout for the content type probe (native builds only)
    pub probe_timeout_secs: u64,

    /// Editing widget theme name
    pub editor_theme: String,

    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            truncate_len: DEFAULT_TRUNCATE_LEN,
            probe_timeout_secs: 10,
            editor_theme: "vs-dark".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl PlaygroundConfig {
    /// Defaults overridden by `PLAYGROUND_*` environment variables
    ///
    /// Unparseable values are ignored. In the browser no variables exist and
    /// the defaults are returned.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce_ms: parse_var("PLAYGROUND_DEBOUNCE_MS").unwrap_or(defaults.debounce_ms),
            truncate_len: parse_var("PLAYGROUND_TRUNCATE_LEN").unwrap_or(defaults.truncate_len),
            probe_timeout_secs: parse_var("PLAYGROUND_PROBE_TIMEOUT_SECS")
                .unwrap_or(defaults.probe_timeout_secs),
            editor_theme: env::var("PLAYGROUND_EDITOR_THEME").unwrap_or(defaults.editor_theme),
            log_filter: env::var("PLAYGROUND_LOG").unwrap_or(defaults.log_filter),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok()?.trim().parse().ok()
}
