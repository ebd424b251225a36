//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.moneywise/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::state::Tab;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MoneywiseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_tab: Option<Tab>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BudgetConfig {
    pub currency_symbol: Option<String>,
    pub sample_data: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_FILE: &str = "moneywise.log";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_tab: Tab,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub currency_symbol: String,
    pub sample_budget: bool,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub tab: Option<Tab>,
    pub log_level: Option<LevelFilter>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.moneywise/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".moneywise").join("config.toml"))
}

/// Load config from `~/.moneywise/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MoneywiseConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MoneywiseConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(MoneywiseConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<MoneywiseConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MoneywiseConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: MoneywiseConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# MoneyWise Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_tab = "home"               # "home", "lessons" or "budget"
# log_level = "info"                 # "off", "error", "warn", "info", "debug", "trace"
# log_file = "moneywise.log"

# [budget]
# currency_symbol = "$"              # Or set MONEYWISE_CURRENCY env var
# sample_data = true                 # Start with example income and expenses
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MoneywiseConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &MoneywiseConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Start tab: CLI → env → config → default
    let start_tab = cli
        .tab
        .or_else(|| env("MONEYWISE_TAB").and_then(|s| parse_tab(&s)))
        .or(config.general.default_tab)
        .unwrap_or_default();

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .or_else(|| env("MONEYWISE_LOG_LEVEL").and_then(|s| parse_level(&s)))
        .or_else(|| config.general.log_level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = env("MONEYWISE_LOG_FILE")
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Currency: env → config → default
    let currency_symbol = env("MONEYWISE_CURRENCY")
        .or_else(|| config.budget.currency_symbol.clone())
        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

    ResolvedConfig {
        start_tab,
        log_level,
        log_file: PathBuf::from(log_file),
        currency_symbol,
        sample_budget: config.budget.sample_data.unwrap_or(true),
    }
}

fn parse_tab(value: &str) -> Option<Tab> {
    match value.trim().to_ascii_lowercase().as_str() {
        "home" => Some(Tab::Home),
        "lessons" => Some(Tab::Lessons),
        "budget" => Some(Tab::Budget),
        other => {
            warn!("Unknown tab {:?}, ignoring", other);
            None
        }
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level {:?}, ignoring", value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = MoneywiseConfig::default();
        assert!(config.general.default_tab.is_none());
        assert!(config.budget.currency_symbol.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&MoneywiseConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.start_tab, Tab::Home);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.currency_symbol, "$");
        assert!(resolved.sample_budget);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MoneywiseConfig {
            general: GeneralConfig {
                default_tab: Some(Tab::Budget),
                log_level: Some("debug".to_string()),
                log_file: Some("/tmp/mw.log".to_string()),
            },
            budget: BudgetConfig {
                currency_symbol: Some("€".to_string()),
                sample_data: Some(false),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.start_tab, Tab::Budget);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/mw.log"));
        assert_eq!(resolved.currency_symbol, "€");
        assert!(!resolved.sample_budget);
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = MoneywiseConfig {
            general: GeneralConfig {
                default_tab: Some(Tab::Budget),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("MONEYWISE_TAB", "lessons"),
            ("MONEYWISE_LOG_LEVEL", "warn"),
            ("MONEYWISE_CURRENCY", "£"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.start_tab, Tab::Lessons);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.currency_symbol, "£");

        let cli = CliOverrides {
            tab: Some(Tab::Home),
            log_level: Some(LevelFilter::Trace),
        };
        let resolved = resolve_with_env(&config, &cli, lookup);
        assert_eq!(resolved.start_tab, Tab::Home);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_bad_env_values_fall_through() {
        let config = MoneywiseConfig {
            general: GeneralConfig {
                default_tab: Some(Tab::Lessons),
                ..Default::default()
            },
            ..Default::default()
        };
        let lookup = |key: &str| match key {
            "MONEYWISE_TAB" => Some("wallet".to_string()),
            "MONEYWISE_LOG_LEVEL" => Some("loud".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), lookup);
        assert_eq!(resolved.start_tab, Tab::Lessons);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_tab = "lessons"
log_level = "debug"

[budget]
currency_symbol = "¥"
sample_data = false
"#;
        let config: MoneywiseConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_tab, Some(Tab::Lessons));
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
        assert_eq!(config.budget.currency_symbol.as_deref(), Some("¥"));
        assert_eq!(config.budget.sample_data, Some(false));

        let written = toml::to_string(&config).unwrap();
        let reparsed: MoneywiseConfig = toml::from_str(&written).unwrap();
        assert_eq!(reparsed.general.default_tab, Some(Tab::Lessons));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let config: MoneywiseConfig = toml::from_str("[budget]\nsample_data = false\n").unwrap();
        assert_eq!(config.budget.sample_data, Some(false));
        assert!(config.general.default_tab.is_none());
        assert!(config.budget.currency_symbol.is_none());
    }

    #[test]
    fn test_load_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.default_tab.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it loads as defaults too.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.budget.sample_data.is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\ndefault_tab = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
