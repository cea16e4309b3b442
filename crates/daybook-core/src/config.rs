//! Client configuration.
//!
//! `ClientConfig` tells a front end where the journal backend lives and how
//! entries are submitted. Front ends load it from a file, then layer
//! environment overrides on top with [`ClientConfig::with_env_overrides`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::notify::DEFAULT_NOTIFICATION_MS;
use crate::util::{is_http_url, normalize_text_option};

pub const ENV_API_BASE_URL: &str = "DAYBOOK_API_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "DAYBOOK_ACCESS_TOKEN";
pub const ENV_INCLUDE_MEDIA: &str = "DAYBOOK_INCLUDE_MEDIA";
pub const ENV_NOTIFICATION_MS: &str = "DAYBOOK_NOTIFICATION_MS";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://journal.example.com`.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Bearer token issued by the identity provider, passed through as-is.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Send attachment data with entries instead of text and captions only.
    #[serde(default)]
    pub include_media: bool,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
}

const fn default_notification_ms() -> u64 {
    DEFAULT_NOTIFICATION_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            access_token: None,
            include_media: false,
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("include_media", &self.include_media)
            .field("notification_ms", &self.notification_ms)
            .finish()
    }
}

impl ClientConfig {
    /// Parse a JSON config document.
    pub fn from_json(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid config JSON: {error}")))?;
        config.normalized()
    }

    /// Apply `DAYBOOK_*` environment variables over this config.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = normalize_text_option(lookup(ENV_API_BASE_URL)) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = normalize_text_option(lookup(ENV_ACCESS_TOKEN)) {
            self.access_token = Some(token);
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_INCLUDE_MEDIA)) {
            self.include_media = parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!("{ENV_INCLUDE_MEDIA} must be true or false, got '{raw}'"))
            })?;
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_NOTIFICATION_MS)) {
            self.notification_ms = raw.parse().map_err(|_| {
                Error::Config(format!("{ENV_NOTIFICATION_MS} must be a number, got '{raw}'"))
            })?;
        }
        self.normalized()
    }

    /// Trim values and validate the backend URL.
    pub fn normalized(mut self) -> Result<Self> {
        self.access_token = normalize_text_option(self.access_token);
        self.api_base_url = match normalize_text_option(self.api_base_url) {
            Some(url) => Some(normalize_base_url(&url)?),
            None => None,
        };
        Ok(self)
    }

    /// The backend URL, or a `Config` error when none is configured.
    pub fn require_api_base_url(&self) -> Result<&str> {
        self.api_base_url.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "No backend configured. Set {ENV_API_BASE_URL} or run `daybook config init`."
            ))
        })
    }
}

/// Require an http(s) URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(trimmed) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_json_normalizes_url_and_defaults() {
        let config = ClientConfig::from_json(r#"{"api_base_url": " https://journal.example.com/ "}"#)
            .unwrap();
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://journal.example.com")
        );
        assert!(!config.include_media);
        assert_eq!(config.notification_ms, DEFAULT_NOTIFICATION_MS);
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let error = ClientConfig::from_json(r#"{"theme": "dark"}"#).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn from_json_rejects_non_http_url() {
        let error = ClientConfig::from_json(r#"{"api_base_url": "journal.example.com"}"#)
            .unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let base = ClientConfig {
            api_base_url: Some("https://file.example.com".to_string()),
            ..ClientConfig::default()
        };
        let config = base
            .with_overrides_from(lookup(&[
                (ENV_API_BASE_URL, "http://localhost:5000/"),
                (ENV_ACCESS_TOKEN, " token-123 "),
                (ENV_INCLUDE_MEDIA, "yes"),
                (ENV_NOTIFICATION_MS, "1500"),
            ]))
            .unwrap();

        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.access_token.as_deref(), Some("token-123"));
        assert!(config.include_media);
        assert_eq!(config.notification_ms, 1_500);
    }

    #[test]
    fn env_overrides_reject_bad_flag() {
        let error = ClientConfig::default()
            .with_overrides_from(lookup(&[(ENV_INCLUDE_MEDIA, "sometimes")]))
            .unwrap_err();
        assert!(error.to_string().contains(ENV_INCLUDE_MEDIA));
    }

    #[test]
    fn require_api_base_url_reports_missing_backend() {
        assert!(matches!(
            ClientConfig::default().require_api_base_url(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn debug_redacts_access_token() {
        let config = ClientConfig {
            access_token: Some("secret-token".to_string()),
            ..ClientConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
