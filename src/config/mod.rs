//! Configuration loading for the chat viewer.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch. The layout heuristics
//! (keyboard threshold, settle delay, bottom gap) are deliberately exposed as
//! configuration rather than hard-coded: they are empirically tuned values
//! that do not generalize to every device.

mod defaults;
mod models;

pub use models::{AppConfig, LogLevel, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Load configuration from the given path, falling back to defaults when the
/// file is absent or malformed.
pub fn load_config(path: &Path) -> AppConfig {
    match try_load_config(path) {
        Ok(config) => {
            debug!(path = %path.display(), "Loaded configuration");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), "Using default configuration: {err}");
            AppConfig::default()
        }
    }
}

fn try_load_config(path: &Path) -> Result<AppConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Reading config file {}", path.display()))?;
    parse_config(&data)
}

pub fn parse_config(data: &str) -> Result<AppConfig> {
    toml::from_str(data).context("Parsing config file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.gap_px, AppConfig::default().gap_px);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = parse_config("gap_px = 20.0\n").expect("partial config parses");
        assert_eq!(config.gap_px, 20.0);
        assert_eq!(
            config.keyboard_threshold,
            AppConfig::default().keyboard_threshold
        );
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_config("gap_px = [oops").is_err());
    }
}
