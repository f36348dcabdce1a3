//! Configuration for chatline.
//!
//! Configuration is a JSON file (`.chatline/config.json` by default). Every
//! field is optional; missing fields take their defaults.

use crate::document::ElementIds;
use crate::markup::MarkupPolicy;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory holding the config file and log, relative to the working directory.
pub const CONFIG_DIR: &str = ".chatline";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding `server_url`.
pub const SERVER_URL_ENV: &str = "CHATLINE_SERVER_URL";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the chat endpoint on the server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds. `None` lets a request run until it
    /// completes or fails on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// How message text is turned into entry markup.
    #[serde(default)]
    pub markup: MarkupPolicy,

    /// Ids the terminal page gives its elements.
    #[serde(default)]
    pub page: ElementIds,

    /// Ids the widget looks for when binding.
    #[serde(default)]
    pub widget: ElementIds,

    /// Log file used while the terminal UI owns the screen.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Event loop tick interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_endpoint() -> String {
    "/chat".into()
}

fn default_log_file() -> PathBuf {
    Path::new(CONFIG_DIR).join("chatline.log")
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            endpoint: default_endpoint(),
            request_timeout_secs: None,
            markup: MarkupPolicy::default(),
            page: ElementIds::default(),
            widget: ElementIds::default(),
            log_file: default_log_file(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Default config path under a working directory.
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Resolve configuration the way the CLI does.
    ///
    /// An explicit path must exist. Otherwise the default path under `dir`
    /// is used when present, falling back to built-in defaults.
    pub fn discover(dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = Self::default_path(dir);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace `server_url` when an override is given.
    #[must_use]
    pub fn with_server_override(mut self, server_url: Option<String>) -> Self {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            self.server_url = url;
        }
        self
    }

    /// Full endpoint URL (`server_url` joined with `endpoint`).
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: format!("{}{}", self.server_url, self.endpoint),
            reason,
        };

        let base = Url::parse(&self.server_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("server URL cannot be a base".into()));
        }
        base.join(&self.endpoint).map_err(|e| invalid(e.to_string()))
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Check the configuration for errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// JSON parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Server URL or endpoint does not form a valid URL.
    #[error("Invalid endpoint URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Any other invalid setting.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
        assert_eq!(config.endpoint, "/chat");
        assert_eq!(config.markup, MarkupPolicy::Raw);
        assert!(config.request_timeout().is_none());
        assert_eq!(config.page, config.widget);
    }

    #[test]
    fn test_endpoint_url() {
        let config = Config::default();
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:5000/chat"
        );
    }

    #[test]
    fn test_invalid_server_url() {
        let config = Config {
            server_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"server_url":"http://bot.local:8080","markup":"escaped"}"#)
                .unwrap();
        assert_eq!(config.server_url, "http://bot.local:8080");
        assert_eq!(config.endpoint, "/chat");
        assert_eq!(config.markup, MarkupPolicy::Escaped);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = Config::default_path(dir.path());

        let config = Config {
            request_timeout_secs: Some(30),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_discover_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::discover(dir.path(), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_discover_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Config::discover(dir.path(), Some(&missing)),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_server_override() {
        let config = Config::default().with_server_override(Some("http://10.0.0.2:5000".into()));
        assert_eq!(config.server_url, "http://10.0.0.2:5000");

        let config = Config::default().with_server_override(Some("  ".into()));
        assert_eq!(config.server_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
