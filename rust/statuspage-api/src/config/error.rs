//! Configuration error types with actionable user messages.

use std::fmt;

/// Configuration errors that tell the operator what to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid configuration value.
    Invalid {
        /// The offending setting, e.g. `server.port`.
        setting: String,
        /// What is wrong.
        message: String,
        /// How to fix it.
        fix_hint: String,
    },
    /// Multiple errors occurred.
    Multiple(Vec<ConfigurationError>),
}

impl std::error::Error for ConfigurationError {}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid {
                setting,
                message,
                fix_hint,
            } => {
                write!(
                    f,
                    "Invalid configuration for {setting}: {message}\n\nHow to fix: {fix_hint}"
                )
            }
            Self::Multiple(errors) => {
                writeln!(f, "Multiple configuration errors:")?;
                for (i, err) in errors.iter().enumerate() {
                    writeln!(f, "\n{}. {}", i + 1, err)?;
                }
                Ok(())
            }
        }
    }
}

impl ConfigurationError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid(
        setting: impl Into<String>,
        message: impl Into<String>,
        fix_hint: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            setting: setting.into(),
            message: message.into(),
            fix_hint: fix_hint.into(),
        }
    }

    /// Collapse a list of errors: one error stays as is, several are wrapped.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_list(mut errors: Vec<ConfigurationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => Some(errors.remove(0)),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// Get the number of errors (1 for single errors, N for multiple).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Multiple(errors) => errors.len(),
            Self::Invalid { .. } => 1,
        }
    }
}

/// Result type for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_error_display() {
        let err = ConfigurationError::invalid(
            "schedule.min_interval_minutes",
            "value 0 is below 1",
            "Set STATUSPAGE__SCHEDULE__MIN_INTERVAL_MINUTES to a value between 1 and 59",
        );
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("schedule.min_interval_minutes"));
        assert!(msg.contains("How to fix"));
    }

    #[test]
    fn test_from_list() {
        assert_eq!(ConfigurationError::from_list(Vec::new()), None);

        let single = ConfigurationError::from_list(vec![ConfigurationError::invalid(
            "a", "b", "c",
        )])
        .unwrap();
        assert_eq!(single.count(), 1);

        let multiple = ConfigurationError::from_list(vec![
            ConfigurationError::invalid("Error 1", "bad", "Fix 1"),
            ConfigurationError::invalid("Error 2", "bad", "Fix 2"),
        ])
        .unwrap();
        let msg = multiple.to_string();
        assert!(msg.contains("Multiple configuration errors"));
        assert!(msg.contains("1."));
        assert!(msg.contains("2."));
        assert_eq!(multiple.count(), 2);
    }
}
