//! Configuration loading and validation.
//!
//! Built once at start-up from an optional TOML file plus environment
//! overrides, then handed to every consumer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Environment variable overriding `data_source.url`.
pub const ENV_DATA_SOURCE_URL: &str = "DATA_SOURCE_URL";

/// Environment variable overriding `data_source.api_key`.
pub const ENV_DATA_SOURCE_KEY: &str = "DATA_SOURCE_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Missing data source setting '{0}' (set it in the config file or via environment)")]
    MissingDataSource(&'static str),
}

/// Remote data store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Project URL of the hosted store, e.g. "https://xyz.supabase.co"
    #[serde(default)]
    pub url: Option<String>,

    /// Anonymous API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Path prefix of the table REST endpoint
    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_rest_path() -> String {
    "rest/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            rest_path: default_rest_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl DataSourceConfig {
    /// Base URL of the table endpoint, e.g. "https://xyz.supabase.co/rest/v1/".
    pub fn rest_base(&self) -> Result<Url, ConfigError> {
        let raw = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::MissingDataSource("url"))?;

        let mut base = Url::parse(raw.trim())
            .map_err(|e| ConfigError::ValidationError(format!("Bad data source URL: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let rest = format!("{}/", self.rest_path.trim_matches('/'));
        base.join(&rest)
            .map_err(|e| ConfigError::ValidationError(format!("Bad REST path: {e}")))
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingDataSource("api_key"))
    }

    /// Both settings must be present for the remote source to be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rest_base()?;
        self.api_key()?;
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Data source timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_source: DataSourceConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file if it exists (defaults otherwise), apply process
    /// environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override data source settings from the environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_DATA_SOURCE_URL).filter(|v| !v.is_empty()) {
            self.data_source.url = Some(url);
        }
        if let Some(key) = lookup(ENV_DATA_SOURCE_KEY).filter(|v| !v.is_empty()) {
            self.data_source.api_key = Some(key);
        }
    }

    /// Validate the configuration.
    ///
    /// Data source credentials are checked separately when the remote
    /// source is built, since snapshot mode runs without them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.data_source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Data source timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn configured() -> DataSourceConfig {
        DataSourceConfig {
            url: Some("https://abc.supabase.co".to_string()),
            api_key: Some("anon-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.data_source.rest_path, "rest/v1");
        assert!(config.data_source.url.is_none());
        assert_eq!(config.data_source.timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.data_source.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rest_base() {
        let base = configured().rest_base().unwrap();
        assert_eq!(base.as_str(), "https://abc.supabase.co/rest/v1/");
        assert_eq!(
            base.join("fighters").unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/fighters"
        );
    }

    #[test]
    fn test_rest_base_keeps_url_path() {
        let mut ds = configured();
        ds.url = Some("http://localhost:54321/proxy".to_string());
        ds.rest_path = "/rest/v1/".to_string();
        assert_eq!(
            ds.rest_base().unwrap().as_str(),
            "http://localhost:54321/proxy/rest/v1/"
        );
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let mut ds = configured();
        ds.url = None;
        assert!(matches!(
            ds.validate(),
            Err(ConfigError::MissingDataSource("url"))
        ));
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut ds = configured();
        ds.api_key = Some("  ".to_string());
        assert!(matches!(
            ds.validate(),
            Err(ConfigError::MissingDataSource("api_key"))
        ));
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut ds = configured();
        ds.url = Some("not a url".to_string());
        assert!(matches!(ds.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::default();
        config.data_source.url = Some("https://from-file.example".to_string());

        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DATA_SOURCE_URL, "https://from-env.example"),
            (ENV_DATA_SOURCE_KEY, "secret"),
        ]);
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(
            config.data_source.url.as_deref(),
            Some("https://from-env.example")
        );
        assert_eq!(config.data_source.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[data_source]
url = "https://abc.supabase.co"
api_key = "anon"
timeout_seconds = 5

[server]
port = 9090
"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data_source.timeout_seconds, 5);
        assert!(config.data_source.validate().is_ok());
    }

    #[test]
    fn test_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.port, parsed.server.port);
    }
}
