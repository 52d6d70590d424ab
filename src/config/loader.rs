//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::feed::DEFAULT_DETAIL_BASE_URL;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is outside its allowed range.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Contents of `config.toml`.
///
/// Every field is optional; absent fields keep the built-in default.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of columns.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Horizontal gap between columns, in cells.
    #[serde(default)]
    pub column_spacing: Option<f64>,

    /// Vertical gap between cards in a column, in rows.
    #[serde(default)]
    pub item_spacing: Option<f64>,

    /// Inset around the cards.
    #[serde(default)]
    pub section_inset: Option<InsetSection>,

    /// Cards revealed per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Elements per union rect of the spatial index.
    #[serde(default)]
    pub union_run: Option<usize>,

    /// Base URL of card detail pages.
    #[serde(default)]
    pub detail_base_url: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// `[section_inset]` table. Missing edges keep their default.
///
/// ```toml
/// [section_inset]
/// left = 2
/// right = 2
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InsetSection {
    /// Top edge.
    #[serde(default)]
    pub top: Option<f64>,
    /// Left edge.
    #[serde(default)]
    pub left: Option<f64>,
    /// Bottom edge.
    #[serde(default)]
    pub bottom: Option<f64>,
    /// Right edge.
    #[serde(default)]
    pub right: Option<f64>,
}

/// Resolved inset edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetConfig {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl Default for InsetConfig {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 1.0,
            bottom: 1.0,
            right: 1.0,
        }
    }
}

impl InsetConfig {
    fn merged(self, section: InsetSection) -> Self {
        Self {
            top: section.top.unwrap_or(self.top),
            left: section.left.unwrap_or(self.left),
            bottom: section.bottom.unwrap_or(self.bottom),
            right: section.right.unwrap_or(self.right),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
/// Values are not range-checked here; the viewer validates them when it
/// builds its layout settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Number of columns.
    pub columns: usize,
    /// Gap between columns.
    pub column_spacing: f64,
    /// Gap between cards in a column.
    pub item_spacing: f64,
    /// Inset around the cards.
    pub section_inset: InsetConfig,
    /// Cards per page.
    pub page_size: usize,
    /// Elements per union rect.
    pub union_run: usize,
    /// Base URL of card detail pages.
    pub detail_base_url: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            column_spacing: 1.0,
            item_spacing: 0.0,
            section_inset: InsetConfig::default(),
            page_size: 20,
            union_run: 20,
            detail_base_url: DEFAULT_DETAIL_BASE_URL.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Default log file: `<state dir>/waterflow/waterflow.log`, or
/// `waterflow.log` in the working directory when the platform has no state
/// directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("waterflow").join("waterflow.log")
    } else {
        PathBuf::from("waterflow.log")
    }
}

/// Read the config file at `path`; `Ok(None)` when there is no such file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] or [`ConfigError::ParseError`] for a
/// file that exists but is unreadable or not valid config TOML.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// `<config dir>/waterflow/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("waterflow").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WATERFLOW_CONFIG` environment variable
/// 3. Default path `~/.config/waterflow/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("WATERFLOW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WATERFLOW_COLUMNS`: Override column count
/// - `WATERFLOW_PAGE_SIZE`: Override page size
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(columns) = env_usize("WATERFLOW_COLUMNS") {
        config.columns = columns;
    }

    if let Some(page_size) = env_usize("WATERFLOW_PAGE_SIZE") {
        config.page_size = page_size;
    }

    config
}

fn env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(var = name, value = %raw, error = %err, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Fill the file's gaps from [`ResolvedConfig::default`].
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        columns: config.columns.unwrap_or(defaults.columns),
        column_spacing: config.column_spacing.unwrap_or(defaults.column_spacing),
        item_spacing: config.item_spacing.unwrap_or(defaults.item_spacing),
        section_inset: config
            .section_inset
            .map_or(defaults.section_inset, |inset| defaults.section_inset.merged(inset)),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        union_run: config.union_run.unwrap_or(defaults.union_run),
        detail_base_url: config.detail_base_url.unwrap_or(defaults.detail_base_url),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply the flags the user passed; they win over every other source.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    columns_override: Option<usize>,
    page_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(columns) = columns_override {
        config.columns = columns;
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_waterflow_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("waterflow.log"),
            "Default log path should end with 'waterflow.log', got: {:?}",
            path
        );
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
