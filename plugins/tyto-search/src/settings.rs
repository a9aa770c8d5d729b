//! Engine configuration from environment, config file and flags
//!
//! Precedence: command-line flags, then the `--config` JSON file if one is
//! given, otherwise `TYTO_*` environment variables, then built-in defaults.

use std::path::Path;

use tracing::warn;
use tyto::{Error, Result};
use tyto_core::{Anchoring, DisplayCase, EngineConfig};

use crate::Args;

/// Build the engine configuration for this run
pub fn resolve(args: &Args) -> Result<EngineConfig> {
    let base = match &args.config {
        Some(path) => from_file(path)?,
        None => from_env(|key| std::env::var(key).ok()),
    };
    let config = apply_flags(base, args);
    config.validate()?;
    Ok(config)
}

/// Load a JSON config file; missing fields keep their defaults
pub fn from_file(path: &Path) -> Result<EngineConfig> {
    let data = std::fs::read(path)?;
    serde_json::from_slice(&data)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Defaults overridden by `TYTO_*` variables read through `lookup`
pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> EngineConfig {
    let mut config = EngineConfig::default();

    if let Some(window) = parse_var(&lookup, "TYTO_WINDOW") {
        config.window = window;
    }
    if let Some(min_query_len) = parse_var(&lookup, "TYTO_MIN_QUERY_LEN") {
        config.min_query_len = min_query_len;
    }
    if let Some(max) = parse_var(&lookup, "TYTO_MAX_SUGGESTIONS") {
        config.max_suggestions = Some(max);
    }
    if let Some(timeout_ms) = parse_var(&lookup, "TYTO_TIMEOUT_MS") {
        config.timeout_ms = Some(timeout_ms);
    }
    if let Some(workers) = parse_var(&lookup, "TYTO_WORKERS") {
        config.worker_threads = workers;
    }

    config
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}

fn apply_flags(mut config: EngineConfig, args: &Args) -> EngineConfig {
    if let Some(window) = args.window {
        config.window = window;
    }
    if let Some(min_query_len) = args.min_query_len {
        config.min_query_len = min_query_len;
    }
    if let Some(max) = args.max_suggestions {
        config.max_suggestions = Some(max);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = Some(timeout_ms);
    }
    if let Some(workers) = args.workers {
        config.worker_threads = workers;
    }
    if args.anchor_start {
        config.anchoring = Anchoring::TermStart;
    }
    if args.capitalize {
        config.display = DisplayCase::Capitalized;
    }
    config
}
