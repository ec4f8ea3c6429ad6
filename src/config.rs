//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The `[agent]` and `[source]` sections are required; everything else
//! falls back to sensible defaults so a minimal config stays minimal.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AgentConfig {
    pub name: String,
    /// Pause between frames when replaying, in milliseconds.
    pub frame_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Path to a JSON-lines replay file of table snapshots.
    pub replay_path: String,
}

/// Default blind sizes, applied to replay frames that omit them.
#[derive(Debug, Deserialize, Clone)]
pub struct TableConfig {
    #[serde(default = "TableConfig::default_sblind")]
    pub sblind: f64,
    #[serde(default = "TableConfig::default_bblind")]
    pub bblind: f64,
    #[serde(default)]
    pub ante: f64,
}

impl TableConfig {
    fn default_sblind() -> f64 {
        1.0
    }

    fn default_bblind() -> f64 {
        2.0
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sblind: Self::default_sblind(),
            bblind: Self::default_bblind(),
            ante: 0.0,
        }
    }
}

/// Per-family diagnostic toggles — the knobs behind the providers'
/// gated debug logging.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DebugConfig {
    #[serde(default)]
    pub memory_symbols: bool,
    #[serde(default)]
    pub blind_posting: bool,
}

/// Symbols evaluated and logged once per frame.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WatchConfig {
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Hand-history recorder settings.
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "HistoryConfig::default_path")]
    pub path: String,
}

impl HistoryConfig {
    fn default_path() -> String {
        "railbird_history.log".to_string()
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: Self::default_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [agent]
            name = "RAILBIRD-TEST"
            frame_interval_ms = 100

            [source]
            replay_path = "frames.jsonl"

            [table]
            sblind = 0.5
            bblind = 1.0
            ante = 0.1

            [debug]
            memory_symbols = true
            blind_posting = true

            [watch]
            symbols = ["betround", "me_re_hands"]

            [history]
            enabled = true
            path = "out.log"
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.agent.name, "RAILBIRD-TEST");
        assert_eq!(cfg.agent.frame_interval_ms, 100);
        assert_eq!(cfg.source.replay_path, "frames.jsonl");
        assert!((cfg.table.sblind - 0.5).abs() < 1e-10);
        assert!((cfg.table.ante - 0.1).abs() < 1e-10);
        assert!(cfg.debug.memory_symbols);
        assert!(cfg.debug.blind_posting);
        assert_eq!(cfg.watch.symbols.len(), 2);
        assert!(cfg.history.enabled);
        assert_eq!(cfg.history.path, "out.log");
    }

    #[test]
    fn test_optional_sections_default() {
        let toml = r#"
            [agent]
            name = "RAILBIRD-MIN"
            frame_interval_ms = 250

            [source]
            replay_path = "frames.jsonl"
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert!((cfg.table.sblind - 1.0).abs() < 1e-10);
        assert!((cfg.table.bblind - 2.0).abs() < 1e-10);
        assert_eq!(cfg.table.ante, 0.0);
        assert!(!cfg.debug.memory_symbols);
        assert!(!cfg.debug.blind_posting);
        assert!(cfg.watch.symbols.is_empty());
        assert!(!cfg.history.enabled);
        assert_eq!(cfg.history.path, "railbird_history.log");
    }

    #[test]
    fn test_missing_required_section_fails() {
        let toml = r#"
            [source]
            replay_path = "frames.jsonl"
        "#;
        assert!(toml::from_str::<AppConfig>(toml).is_err());
    }

    #[test]
    fn test_load_config_file() {
        // This test requires config.toml to be in the working directory.
        let result = AppConfig::load("config.toml");
        if let Ok(cfg) = result {
            assert_eq!(cfg.agent.name, "RAILBIRD-001");
            assert!(cfg.agent.frame_interval_ms > 0);
            assert!(cfg.table.sblind > 0.0);
            assert!(cfg.table.bblind >= cfg.table.sblind);
        }
        // If config.toml isn't found, that's acceptable in some test environments
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = AppConfig::load("/nonexistent/railbird.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
