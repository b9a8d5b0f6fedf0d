//! Application configuration for Scopewise.
//!
//! User config lives at `~/.scopewise/scopewise.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! Weight tables and tier thresholds are not configurable; they are
//! compiled into `scopewise-core`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScopewiseError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "scopewise.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".scopewise";

// ---------------------------------------------------------------------------
// Config structs (matching scopewise.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Feature catalog file. When unset, the built-in catalog is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,

    /// Output format for `score`: "markdown" or "json".
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Directory reports are written to when `--out` is given without a path.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            output_format: default_output_format(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_format() -> String {
    "markdown".into()
}
fn default_output_dir() -> String {
    "scope-plans".into()
}

/// `[report]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Heading of the generated summary.
    #[serde(default = "default_title")]
    pub title: String,

    /// Whether per-feature reasons and consultation notes are printed.
    #[serde(default = "default_true")]
    pub show_reasons: bool,

    /// Whether phases without features still get a heading.
    #[serde(default)]
    pub show_empty_phases: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_reasons: true,
            show_empty_phases: false,
        }
    }
}

fn default_title() -> String {
    "Search Implementation Scope".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.scopewise/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ScopewiseError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.scopewise/scopewise.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScopewiseError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ScopewiseError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ScopewiseError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ScopewiseError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ScopewiseError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject config values the CLI cannot act on.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.defaults.output_format.as_str() {
        "markdown" | "json" => Ok(()),
        other => Err(ScopewiseError::config(format!(
            "unknown output_format '{other}': expected 'markdown' or 'json'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_format"));
        assert!(toml_str.contains("Search Implementation Scope"));
        assert!(!toml_str.contains("catalog_path"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.output_format, "markdown");
        assert!(parsed.report.show_reasons);
        assert!(!parsed.report.show_empty_phases);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
catalog_path = "/srv/catalog.json"

[report]
title = "Acme Search Plan"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.catalog_path.as_deref(), Some("/srv/catalog.json"));
        assert_eq!(config.defaults.output_dir, "scope-plans");
        assert_eq!(config.report.title, "Acme Search Plan");
        assert!(config.report.show_reasons);
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let mut config = AppConfig::default();
        config.defaults.output_format = "pdf".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("unknown output_format 'pdf'"));
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("scopewise-test-missing-config-12345.toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ScopewiseError::Io { .. }));
    }
}
