//! Startup validation for the status page API configuration.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use super::error::{ConfigResult, ConfigurationError};
use super::{AppConfig, LoggingConfig, ScheduleConfig, ServerConfig};

/// Largest meaningful minute-step floor; `*/60` is not a valid minute step.
const MAX_MIN_INTERVAL: u32 = 59;

/// Configuration validator.
///
/// Collects every problem rather than stopping at the first, so operators
/// can fix a bad config in one pass.
#[derive(Debug)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the entire application configuration.
    pub fn validate(config: &AppConfig) -> ConfigResult<()> {
        let mut errors = Vec::new();
        errors.extend(Self::validate_server(&config.server));
        errors.extend(Self::validate_schedule(&config.schedule));
        errors.extend(Self::validate_logging(&config.logging));

        match ConfigurationError::from_list(errors) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    fn validate_server(server: &ServerConfig) -> Vec<ConfigurationError> {
        let mut errors = Vec::new();
        if server.port == 0 {
            errors.push(ConfigurationError::invalid(
                "server.port",
                "port 0 is not allowed",
                "Set STATUSPAGE__SERVER__PORT to a free TCP port, e.g. 8080",
            ));
        }
        if server.timeout_secs == 0 {
            errors.push(ConfigurationError::invalid(
                "server.timeout_secs",
                "request timeout must be positive",
                "Set STATUSPAGE__SERVER__TIMEOUT_SECS to at least 1",
            ));
        }
        errors
    }

    fn validate_schedule(schedule: &ScheduleConfig) -> Vec<ConfigurationError> {
        let value = schedule.min_interval_minutes;
        if (1..=MAX_MIN_INTERVAL).contains(&value) {
            return Vec::new();
        }
        vec![ConfigurationError::invalid(
            "schedule.min_interval_minutes",
            format!("value {value} is outside 1-{MAX_MIN_INTERVAL}"),
            "Set STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES between 1 and 59 (GitHub Actions needs 5)",
        )]
    }

    fn validate_logging(logging: &LoggingConfig) -> Vec<ConfigurationError> {
        let level = logging.level.as_str();
        // A bare word is read by EnvFilter as a target name, so it must be a level.
        let parsed = if level.contains(['=', ',']) {
            EnvFilter::try_new(level).map(|_| ()).map_err(|e| e.to_string())
        } else {
            level
                .parse::<LevelFilter>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        };
        match parsed {
            Ok(()) => Vec::new(),
            Err(e) => vec![ConfigurationError::invalid(
                "logging.level",
                format!("'{}' is not a valid filter: {e}", logging.level),
                "Use a level such as info or debug, or a directive like info,tower_http=debug",
            )],
        }
    }
}
