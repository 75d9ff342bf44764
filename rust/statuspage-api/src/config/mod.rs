//! Configuration management for the status page API.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `config/statuspage.{toml,yaml,json}` or an explicit `--config` file
//! 3. `STATUSPAGE__SECTION__KEY` environment variables (`.env` is loaded first)
//!
//! Use [`ConfigValidator`] to check the result before startup. [`AppConfig::load`]
//! does this for you.

pub mod error;
pub mod validator;

pub use error::{ConfigResult, ConfigurationError};
pub use validator::ConfigValidator;

use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Schedule preview settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration from the default locations.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Load and validate configuration, reading `config_file` instead of the
    /// default `config/statuspage` when given.
    pub fn load_from(config_file: Option<&str>) -> anyhow::Result<Self> {
        let config = Self::load_unchecked(config_file)?;

        ConfigValidator::validate(&config)
            .map_err(|e| anyhow::anyhow!("Configuration validation failed:\n\n{e}"))?;

        Ok(config)
    }

    /// Load configuration without validation.
    pub fn load_unchecked(config_file: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file_source = match config_file {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name("config/statuspage").required(false),
        };

        let config = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default(
                "schedule.min_interval_minutes",
                i64::from(default_min_interval()),
            )?
            .set_default("logging.level", default_log_level())?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("STATUSPAGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// API port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Schedule preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Floor for `*/N * * * *` schedules when a request does not supply one.
    ///
    /// GitHub Actions refuses to run scheduled workflows more often than
    /// every 5 minutes.
    #[serde(default = "default_min_interval")]
    pub min_interval_minutes: u32,
}

fn default_min_interval() -> u32 {
    5
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            min_interval_minutes: default_min_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive string.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to use JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.schedule.min_interval_minutes, 5);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        // SAFETY: env-mutating tests are serialized.
        unsafe {
            std::env::set_var("STATUSPAGE__SERVER__PORT", "9191");
            std::env::set_var("STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES", "15");
        }
        let config = AppConfig::load_unchecked(None);
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("STATUSPAGE__SERVER__PORT");
            std::env::remove_var("STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES");
        }

        let config = config.unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.schedule.min_interval_minutes, 15);
    }

    #[test]
    #[serial]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statuspage.toml");
        std::fs::write(
            &path,
            "[server]\nport = 7070\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.server.port, 7070);
        assert!(config.logging.json);
        assert_eq!(config.schedule.min_interval_minutes, 5);
    }

    #[test]
    #[serial]
    fn test_invalid_config_rejected() {
        // SAFETY: env-mutating tests are serialized.
        unsafe { std::env::set_var("STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES", "0") };
        let result = AppConfig::load();
        // SAFETY: as above.
        unsafe { std::env::remove_var("STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES") };

        let err = result.unwrap_err().to_string();
        assert!(err.contains("min_interval_minutes"));
    }
}
