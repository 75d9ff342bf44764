//! "Simple schedule" selectors for the admin form.
//!
//! The form offers a frequency plus time-of-day and weekday pickers instead
//! of a raw expression. [`SimpleSchedule::to_expression`] renders the
//! selection; [`SimpleSchedule::detect`] goes the other way so an existing
//! job can pre-fill the form. Expressions that do not fit one of these
//! shapes need the advanced editor.

use serde::{Deserialize, Serialize};

use super::cron::{CronError, CronExpression, CronField, CronParser, FieldKind};
use super::describe::describe;

/// A schedule picked from the simple form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "snake_case")]
pub enum SimpleSchedule {
    /// Every `interval` minutes (`*/N * * * *`).
    EveryMinutes { interval: u32 },
    /// Once an hour at `minute`.
    Hourly { minute: u32 },
    /// Every `interval` hours on the hour (`0 */N * * *`).
    EveryHours { interval: u32 },
    /// Once a day.
    Daily { hour: u32, minute: u32 },
    /// Once a week; `weekday` is 0-6 with 0 = Sunday.
    Weekly { weekday: u32, hour: u32, minute: u32 },
    /// Once a month on `day`.
    Monthly { day: u32, hour: u32, minute: u32 },
}

impl SimpleSchedule {
    /// Render the cron expression for this selection.
    ///
    /// The result is run back through the parser, so out-of-range selectors
    /// (minute 75, weekday 9, ...) are reported as [`CronError`].
    pub fn to_expression(&self) -> Result<String, CronError> {
        let expr = match *self {
            Self::EveryMinutes { interval } => format!("*/{interval} * * * *"),
            Self::Hourly { minute } => format!("{minute} * * * *"),
            Self::EveryHours { interval } => format!("0 */{interval} * * *"),
            Self::Daily { hour, minute } => format!("{minute} {hour} * * *"),
            Self::Weekly {
                weekday,
                hour,
                minute,
            } => format!("{minute} {hour} * * {weekday}"),
            Self::Monthly { day, hour, minute } => format!("{minute} {hour} {day} * *"),
        };
        CronParser::parse(&expr)?;
        Ok(expr)
    }

    /// Recover the simple selection behind `expression`, if there is one.
    pub fn detect(expression: &str) -> Option<Self> {
        let expr = CronParser::parse(expression).ok()?;
        Self::from_expression(&expr)
    }

    /// Human-readable label for this selection.
    pub fn describe(&self) -> Result<String, CronError> {
        self.to_expression().map(|expr| describe(&expr))
    }

    fn from_expression(expr: &CronExpression) -> Option<Self> {
        use CronField::{Any, Step, Value};

        let fields = (
            expr.field(FieldKind::Minute),
            expr.field(FieldKind::Hour),
            expr.field(FieldKind::DayOfMonth),
            expr.field(FieldKind::Month),
            expr.field(FieldKind::DayOfWeek),
        );

        let schedule = match fields {
            (Step(interval), Any, Any, Any, Any) => Self::EveryMinutes {
                interval: *interval,
            },
            (Value(minute), Any, Any, Any, Any) => Self::Hourly { minute: *minute },
            (Value(0), Step(interval), Any, Any, Any) => Self::EveryHours {
                interval: *interval,
            },
            (Value(minute), Value(hour), Any, Any, Any) => Self::Daily {
                hour: *hour,
                minute: *minute,
            },
            (Value(minute), Value(hour), Any, Any, Value(weekday)) => Self::Weekly {
                weekday: *weekday,
                hour: *hour,
                minute: *minute,
            },
            (Value(minute), Value(hour), Value(day), Any, Any) => Self::Monthly {
                day: *day,
                hour: *hour,
                minute: *minute,
            },
            _ => return None,
        };
        Some(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_expression() {
        let cases = [
            (SimpleSchedule::EveryMinutes { interval: 5 }, "*/5 * * * *"),
            (SimpleSchedule::Hourly { minute: 15 }, "15 * * * *"),
            (SimpleSchedule::EveryHours { interval: 6 }, "0 */6 * * *"),
            (SimpleSchedule::Daily { hour: 9, minute: 30 }, "30 9 * * *"),
            (
                SimpleSchedule::Weekly {
                    weekday: 1,
                    hour: 8,
                    minute: 0,
                },
                "0 8 * * 1",
            ),
            (
                SimpleSchedule::Monthly {
                    day: 1,
                    hour: 0,
                    minute: 0,
                },
                "0 0 1 * *",
            ),
        ];
        for (schedule, expected) in cases {
            assert_eq!(schedule.to_expression().unwrap(), expected);
            assert_eq!(SimpleSchedule::detect(expected), Some(schedule));
        }
    }

    #[test]
    fn test_out_of_range_selectors_rejected() {
        assert!(SimpleSchedule::Daily { hour: 24, minute: 0 }
            .to_expression()
            .is_err());
        assert!(SimpleSchedule::EveryMinutes { interval: 0 }
            .to_expression()
            .is_err());
        let err = SimpleSchedule::Weekly {
            weekday: 9,
            hour: 1,
            minute: 1,
        }
        .to_expression()
        .unwrap_err();
        assert!(err.to_string().contains("day-of-week"));
    }

    #[test]
    fn test_detect_needs_advanced_editor() {
        assert_eq!(SimpleSchedule::detect("7 3 1 2 *"), None);
        assert_eq!(SimpleSchedule::detect("30 14 * * 1-5"), None);
        assert_eq!(SimpleSchedule::detect("* * * * *"), None);
        assert_eq!(SimpleSchedule::detect("invalid"), None);
    }

    #[test]
    fn test_describe_selection() {
        let schedule = SimpleSchedule::Daily { hour: 0, minute: 0 };
        assert_eq!(schedule.describe().unwrap(), "Daily at midnight");
        let schedule = SimpleSchedule::EveryMinutes { interval: 10 };
        assert_eq!(schedule.describe().unwrap(), "Every 10 minutes");
    }

    #[test]
    fn test_serde_shape() {
        let schedule: SimpleSchedule =
            serde_json::from_str(r#"{"frequency":"weekly","weekday":0,"hour":12,"minute":5}"#)
                .unwrap();
        assert_eq!(
            schedule,
            SimpleSchedule::Weekly {
                weekday: 0,
                hour: 12,
                minute: 5
            }
        );
        let json = serde_json::to_value(SimpleSchedule::EveryMinutes { interval: 5 }).unwrap();
        assert_eq!(json["frequency"], "every_minutes");
        assert_eq!(json["interval"], 5);
    }
}
