//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TERMTRIS_SEED` | 1 | Piece generator seed |
//! | `TERMTRIS_PRESET` | 0 | Starting preset index (wraps) |
//! | `TERMTRIS_PRESETS_PATH` | unset | JSON file of extra presets |
//! | `TERMTRIS_LOG_PATH` | unset | Log file; no logging when unset |
//! | `TERMTRIS_TICK_MS` | 16 | Frame/poll interval |
//!
//! Values that fail to parse fall back to the default.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use tracing::info;

use crate::core::{load_presets, PresetCatalog};
use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub preset: usize,
    pub presets_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub tick_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            preset: 0,
            presets_path: None,
            log_path: None,
            tick_ms: TICK_MS,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: parse_var(&lookup, "TERMTRIS_SEED").unwrap_or(defaults.seed),
            preset: parse_var(&lookup, "TERMTRIS_PRESET").unwrap_or(defaults.preset),
            presets_path: path_var(&lookup, "TERMTRIS_PRESETS_PATH"),
            log_path: path_var(&lookup, "TERMTRIS_LOG_PATH"),
            tick_ms: parse_var(&lookup, "TERMTRIS_TICK_MS")
                .filter(|&ms: &u32| ms > 0)
                .unwrap_or(defaults.tick_ms),
        }
    }

    /// Built-in presets plus any from the presets file, with the starting
    /// preset selected
    pub fn preset_catalog(&self) -> Result<PresetCatalog> {
        let mut catalog = PresetCatalog::builtin();
        if let Some(path) = &self.presets_path {
            let extra = load_presets(path)?;
            info!(path = %path.display(), count = extra.len(), "extra presets loaded");
            catalog.extend(extra);
        }
        catalog.select(self.preset);
        Ok(catalog)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn path_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("TERMTRIS_SEED", "42"),
            ("TERMTRIS_PRESET", " 3 "),
            ("TERMTRIS_LOG_PATH", "/tmp/termtris.log"),
            ("TERMTRIS_TICK_MS", "10"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.preset, 3);
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/termtris.log")));
        assert_eq!(config.presets_path, None);
        assert_eq!(config.tick_ms, 10);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("TERMTRIS_SEED", "many"),
            ("TERMTRIS_TICK_MS", "0"),
            ("TERMTRIS_LOG_PATH", "  "),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_preset_index_wraps() {
        let config = Config {
            preset: 7,
            ..Config::default()
        };
        let catalog = config.preset_catalog().unwrap();
        assert_eq!(catalog.index(), 7 % catalog.len());
    }

    #[test]
    fn test_missing_presets_file_is_an_error() {
        let config = Config {
            presets_path: Some(PathBuf::from("/nonexistent/termtris-presets.json")),
            ..Config::default()
        };
        let err = config.preset_catalog().unwrap_err();
        assert!(format!("{:#}", err).contains("termtris-presets.json"));
    }
}
