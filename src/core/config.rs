//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Default base URL of the Office add-in directory API.
pub const DEFAULT_ADDINS_BASE_URL: &str = "https://api.addins.omex.office.net/api";

/// Default per-request timeout, in seconds.
pub const DEFAULT_ADDINS_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Add-in directory API configuration.
    pub addins: AddinsApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Office add-in directory API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddinsApiConfig {
    /// Base URL; the details and search endpoints live under `addins/`.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl AddinsApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AddinsApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADDINS_BASE_URL.to_string(),
            timeout_secs: DEFAULT_ADDINS_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "office-addins-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            addins: AddinsApiConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` only.
    ///
    /// Logging has to be up before [`Config::from_env`] runs, otherwise its
    /// fallback warnings are emitted with no subscriber installed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_ADDINS_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_ADDINS_BASE_URL") {
            info!("Add-in directory base URL overridden: {}", base_url);
            config.addins.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_ADDINS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.addins.timeout_secs = secs,
                _ => warn!(
                    "Invalid MCP_ADDINS_TIMEOUT_SECS '{}', using {}s",
                    timeout, DEFAULT_ADDINS_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Reject values that would only fail later, on the first tool call.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        let base = Url::parse(&self.addins.base_url).map_err(|e| {
            Error::config(format!(
                "invalid add-in directory URL '{}': {}",
                self.addins.base_url, e
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "add-in directory URL must be http or https, got '{}'",
                base.scheme()
            )));
        }

        if self.addins.timeout_secs == 0 {
            return Err(Error::config("add-in directory timeout must be positive"));
        }

        Ok(())
    }
}

/// Serializes tests that mutate `MCP_*` environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Run `f` with a subscriber that writes plain log lines into a buffer.
    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || CapturedWriter(writer.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_addins_defaults() {
        let config = Config::default();
        assert_eq!(config.addins.base_url, DEFAULT_ADDINS_BASE_URL);
        assert_eq!(config.addins.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_addins_config() {
        let mut config = Config::default();
        config.addins.base_url = "ftp://example.com/api".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.addins.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.addins.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_addins_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ADDINS_BASE_URL", "http://127.0.0.1:9999/api");
            std::env::set_var("MCP_ADDINS_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.addins.base_url, "http://127.0.0.1:9999/api");
        assert_eq!(config.addins.timeout_secs, 5);
        unsafe {
            std::env::remove_var("MCP_ADDINS_BASE_URL");
            std::env::remove_var("MCP_ADDINS_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ADDINS_TIMEOUT_SECS", "soon");
        }
        let mut loaded = None;
        let logs = capture_logs(|| loaded = Some(Config::from_env()));
        let config = loaded.unwrap();
        assert_eq!(config.addins.timeout_secs, DEFAULT_ADDINS_TIMEOUT_SECS);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Invalid MCP_ADDINS_TIMEOUT_SECS 'soon', using 30s"));
        unsafe {
            std::env::remove_var("MCP_ADDINS_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_base_url_override_is_logged() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ADDINS_BASE_URL", "http://127.0.0.1:9999/api");
        }
        let logs = capture_logs(|| {
            Config::from_env();
        });
        assert!(logs.contains("Add-in directory base URL overridden: http://127.0.0.1:9999/api"));
        unsafe {
            std::env::remove_var("MCP_ADDINS_BASE_URL");
        }
    }

    #[test]
    fn test_log_level_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        assert_eq!(LoggingConfig::from_env().level, "debug");
        assert_eq!(Config::from_env().logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
        }
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "addins-test");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "addins-test");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }
}
