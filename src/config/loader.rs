//! Config file loader and validation.

use super::{BuildConfig, CONFIG_FILE_NAME};
use crate::error::ConfigError;
use std::fs;
use std::path::Path;

/// Load config from a TOML file.
pub fn load_config_from_file(path: &Path) -> Result<BuildConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Configuration file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let config: BuildConfig = toml::from_str(&content)?;
    validate_config(&config)?;

    Ok(config)
}

/// Load `sen-build.toml` from `dir`, or fall back to defaults if there is none.
pub fn load_or_default(dir: &Path) -> Result<BuildConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        log::debug!("[Config] No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
        return Ok(BuildConfig::default());
    }
    log::info!("[Config] Loading {}", path.display());
    load_config_from_file(&path)
}

/// Reject values that would produce a broken destination or command line.
pub fn validate_config(config: &BuildConfig) -> Result<(), ConfigError> {
    let name = config.project_name.trim();
    if name.is_empty() {
        return Err(ConfigError::ValidationFailed(
            "project_name cannot be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::ValidationFailed(format!(
            "project_name must be a single directory name, got '{}'",
            config.project_name
        )));
    }

    if config.repository_url.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "repository_url cannot be empty".to_string(),
        ));
    }

    if config.vcs_command.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "vcs_command cannot be empty".to_string(),
        ));
    }

    Ok(())
}
