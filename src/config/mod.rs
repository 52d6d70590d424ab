//! Configuration module.
//!
//! Layered resolution: defaults, then the TOML config file, then environment
//! variables, then CLI flags. See [`loader`] for the precedence rules.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_with_precedence, merge_config, ConfigError, ConfigFile, InsetConfig, InsetSection,
    ResolvedConfig,
};

/// Resolve the full configuration for one run.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    columns_override: Option<usize>,
    page_size_override: Option<usize>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file));
    Ok(apply_cli_overrides(config, columns_override, page_size_override))
}
