//! CLI config file and effective config resolution.

use std::path::{Path, PathBuf};

use daybook_core::config::ClientConfig;

use crate::cli::GlobalArgs;
use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("daybook").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI config directory".to_string()))
}

pub fn config_path(global: &GlobalArgs) -> Result<PathBuf, CliError> {
    global.config.clone().map_or_else(default_config_path, Ok)
}

/// Missing files load as the default config.
pub fn load_from_path(path: &Path) -> Result<ClientConfig, CliError> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|error| {
        CliError::Config(format!(
            "Failed to read config at {}: {error}",
            path.display()
        ))
    })?;
    ClientConfig::from_json(&raw).map_err(|error| {
        CliError::Config(format!(
            "Failed to parse config at {}: {error}",
            path.display()
        ))
    })
}

pub fn save_to_path(config: &ClientConfig, path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            CliError::Config(format!(
                "Failed to create config directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    let normalized = config.clone().normalized()?;
    let serialized = serde_json::to_string_pretty(&normalized)?;
    std::fs::write(path, serialized).map_err(|error| {
        CliError::Config(format!(
            "Failed to write config at {}: {error}",
            path.display()
        ))
    })
}

/// File, then `DAYBOOK_*` environment variables, then command-line flags.
pub fn resolve_client_config(global: &GlobalArgs) -> Result<ClientConfig, CliError> {
    let path = config_path(global)?;
    let config = load_from_path(&path)?.with_env_overrides()?;
    tracing::debug!(path = %path.display(), "Loaded client config");
    apply_flags(config, global)
}

pub fn apply_flags(mut config: ClientConfig, global: &GlobalArgs) -> Result<ClientConfig, CliError> {
    if let Some(url) = &global.api_url {
        config.api_base_url = Some(url.clone());
    }
    if let Some(token) = &global.token {
        config.access_token = Some(token.clone());
    }
    if global.include_media {
        config.include_media = true;
    }
    Ok(config.normalized()?)
}
