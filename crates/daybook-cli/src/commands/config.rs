use std::path::Path;

use daybook_core::config::ClientConfig;

use crate::cli::{ConfigCommands, GlobalArgs};
use crate::config_file::{config_path, load_from_path, resolve_client_config, save_to_path};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global: &GlobalArgs) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            token,
            include_media,
        } => {
            let path = config_path(global)?;
            let config = run_config_init(&path, &api_url, token, include_media)?;
            println!("Saved config to {}", path.display());
            for line in format_config_lines(&config) {
                println!("{line}");
            }
        }
        ConfigCommands::Show => {
            let config = resolve_client_config(global)?;
            for line in format_config_lines(&config) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Merge new backend settings into the file at `path`, keeping other fields.
pub fn run_config_init(
    path: &Path,
    api_url: &str,
    token: Option<String>,
    include_media: bool,
) -> Result<ClientConfig, CliError> {
    let mut config = load_from_path(path)?;
    config.api_base_url = Some(api_url.to_string());
    if token.is_some() {
        config.access_token = token;
    }
    config.include_media = include_media;

    let config = config.normalized()?;
    save_to_path(&config, path)?;
    Ok(config)
}

pub fn format_config_lines(config: &ClientConfig) -> Vec<String> {
    vec![
        format!(
            "api_base_url: {}",
            config.api_base_url.as_deref().unwrap_or("(not set)")
        ),
        format!(
            "access_token: {}",
            if config.access_token.is_some() {
                "[REDACTED]"
            } else {
                "(not set)"
            }
        ),
        format!("include_media: {}", config.include_media),
        format!("notification_ms: {}", config.notification_ms),
    ]
}
