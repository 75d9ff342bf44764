//! Human-readable descriptions for common cron idioms.
//!
//! Not a general cron-to-English translator: only the idioms listed in
//! [`IDIOMS`] are recognized, in priority order. Anything else is echoed
//! back unchanged.

use super::cron::{CronExpression, CronField, CronParser, FieldKind};

/// A recognized schedule shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idiom {
    /// `* * * * *`
    EveryMinute,
    /// `*/N * * * *`
    EveryNMinutes,
    /// `0 * * * *`
    Hourly,
    /// `0 */N * * *`
    EveryNHours,
    /// `0 0 * * *`
    DailyAtMidnight,
    /// `0 0 * * 0`
    WeeklyOnSundayAtMidnight,
    /// `M H * * *`
    DailyAt,
    /// `M H * * D`
    WeeklyAt,
    /// `M H D * *`
    MonthlyAt,
    /// `M * * * *`
    HourlyAtMinute,
}

/// Idioms in the order they are tried. The first match wins.
pub const IDIOMS: [Idiom; 10] = [
    Idiom::EveryMinute,
    Idiom::EveryNMinutes,
    Idiom::Hourly,
    Idiom::EveryNHours,
    Idiom::DailyAtMidnight,
    Idiom::WeeklyOnSundayAtMidnight,
    Idiom::DailyAt,
    Idiom::WeeklyAt,
    Idiom::MonthlyAt,
    Idiom::HourlyAtMinute,
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl Idiom {
    /// The first idiom in [`IDIOMS`] that matches `expr`.
    #[must_use]
    pub fn classify(expr: &CronExpression) -> Option<Self> {
        IDIOMS.into_iter().find(|idiom| idiom.label(expr).is_some())
    }

    /// Label for `expr` if it has this idiom's shape.
    #[must_use]
    pub fn label(self, expr: &CronExpression) -> Option<String> {
        use CronField::{Any, Step, Value};

        let fields = (
            expr.field(FieldKind::Minute),
            expr.field(FieldKind::Hour),
            expr.field(FieldKind::DayOfMonth),
            expr.field(FieldKind::Month),
            expr.field(FieldKind::DayOfWeek),
        );

        match (self, fields) {
            (Self::EveryMinute, (Any, Any, Any, Any, Any)) => Some("Every minute".to_string()),
            (Self::EveryNMinutes, (Step(n), Any, Any, Any, Any)) => Some(every(*n, "minute")),
            (Self::Hourly, (Value(0), Any, Any, Any, Any)) => Some("Every hour".to_string()),
            (Self::EveryNHours, (Value(0), Step(n), Any, Any, Any)) => Some(every(*n, "hour")),
            (Self::DailyAtMidnight, (Value(0), Value(0), Any, Any, Any)) => {
                Some("Daily at midnight".to_string())
            }
            (Self::WeeklyOnSundayAtMidnight, (Value(0), Value(0), Any, Any, Value(0))) => {
                Some("Weekly on Sunday at midnight".to_string())
            }
            (Self::DailyAt, (Value(m), Value(h), Any, Any, Any)) => {
                Some(format!("Daily at {}", clock(*h, *m)))
            }
            (Self::WeeklyAt, (Value(m), Value(h), Any, Any, Value(d))) => Some(format!(
                "Weekly on {} at {}",
                weekday_name(*d),
                clock(*h, *m)
            )),
            (Self::MonthlyAt, (Value(m), Value(h), Value(d), Any, Any)) => {
                Some(format!("Monthly on day {d} at {}", clock(*h, *m)))
            }
            (Self::HourlyAtMinute, (Value(m), Any, Any, Any, Any)) => {
                Some(format!("Every hour at minute {m}"))
            }
            _ => None,
        }
    }
}

/// Describe `expression`, or return it verbatim if no idiom matches.
///
/// Never fails: invalid input is also returned unchanged.
pub fn describe(expression: &str) -> String {
    CronParser::parse(expression)
        .ok()
        .and_then(|expr| IDIOMS.iter().find_map(|idiom| idiom.label(&expr)))
        .unwrap_or_else(|| expression.to_string())
}

/// Name for a day-of-week value (0 = Sunday).
#[must_use]
pub fn weekday_name(day: u32) -> &'static str {
    usize::try_from(day)
        .ok()
        .and_then(|i| WEEKDAYS.get(i))
        .copied()
        .unwrap_or("?")
}

fn every(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("Every 1 {unit}")
    } else {
        format!("Every {n} {unit}s")
    }
}

fn clock(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_describe_known_idioms() {
        let cases = [
            ("* * * * *", "Every minute"),
            ("*/5 * * * *", "Every 5 minutes"),
            ("*/1 * * * *", "Every 1 minute"),
            ("0 * * * *", "Every hour"),
            ("0 */6 * * *", "Every 6 hours"),
            ("0 0 * * *", "Daily at midnight"),
            ("0 0 * * 0", "Weekly on Sunday at midnight"),
            ("30 9 * * *", "Daily at 09:30"),
            ("15 18 * * 5", "Weekly on Friday at 18:15"),
            ("0 6 1 * *", "Monthly on day 1 at 06:00"),
            ("45 * * * *", "Every hour at minute 45"),
        ];
        for (expr, expected) in cases {
            assert_eq!(describe(expr), expected, "describing {expr:?}");
        }
    }

    #[test]
    fn test_describe_unrecognized_is_verbatim() {
        assert_eq!(describe("7 3 1 2 *"), "7 3 1 2 *");
        assert_eq!(describe("30 14 * * 1-5"), "30 14 * * 1-5");
        assert_eq!(describe("1,15,30 * * * *"), "1,15,30 * * * *");
    }

    #[test]
    fn test_describe_invalid_is_verbatim() {
        assert_eq!(describe(""), "");
        assert_eq!(describe("not cron"), "not cron");
        assert_eq!(describe("  60 * * * * "), "  60 * * * * ");
    }

    #[test]
    fn test_priority_order() {
        let midnight = CronParser::parse("0 0 * * *").unwrap();
        assert_eq!(Idiom::classify(&midnight), Some(Idiom::DailyAtMidnight));
        // DailyAt would also match; the earlier entry wins.
        assert!(Idiom::DailyAt.label(&midnight).is_some());

        let sunday = CronParser::parse("0 0 * * 0").unwrap();
        assert_eq!(Idiom::classify(&sunday), Some(Idiom::WeeklyOnSundayAtMidnight));
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(weekday_name(7), "?");
    }

    proptest! {
        #[test]
        fn prop_step_description_contains_interval(n in 1u32..=59) {
            let description = describe(&format!("*/{n} * * * *"));
            prop_assert!(description.contains(&n.to_string()));
        }

        #[test]
        fn prop_describe_is_pure(s in "\\PC{0,24}") {
            prop_assert_eq!(describe(&s), describe(&s));
        }
    }
}
