//! Cron expression parsing, validation and next-run estimation.
//!
//! Supports the five-field format `minute hour day month weekday`. Each
//! field is one of `*`, a literal, `*/N`, a comma list of literals, or an
//! inclusive range `A-B`. Lists and steps are mutually exclusive within a
//! field, so `1,2/5` and `1-5/2` are rejected.
//!
//! The next-run estimate is for display only. Day-of-month and day-of-week
//! are ANDed together, and `*/N` matches `value % N == 0` on every field.
//! For day-of-month and month (minimum 1) that is divisibility from zero,
//! not from the field minimum: `*/2` in the day field matches days
//! 2, 4, 6, ... rather than 1, 3, 5, ....

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// How far ahead the general-path scan looks before giving up (24 hours).
pub const SEARCH_HORIZON_MINUTES: u32 = 24 * 60;

/// Errors produced while parsing a cron expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CronError {
    /// The expression does not have exactly five fields.
    #[error("cron expression must have 5 fields, found {found}")]
    FieldCount { found: usize },

    /// A single field failed to parse or is out of range.
    #[error("invalid {field} field '{value}': {reason}")]
    InvalidField {
        field: FieldKind,
        value: String,
        reason: String,
    },
}

/// The five positions of a cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    /// All fields in expression order.
    pub const ALL: [Self; 5] = [
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    /// Inclusive `(min, max)` bounds for values in this field.
    #[must_use]
    pub const fn bounds(self) -> (u32, u32) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        };
        f.write_str(name)
    }
}

/// A single parsed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronField {
    /// Wildcard (`*`) - matches all values.
    Any,
    /// Specific value.
    Value(u32),
    /// List of values (e.g. `1,15,30`).
    List(Vec<u32>),
    /// Inclusive range (e.g. `1-5`).
    Range(u32, u32),
    /// Step (e.g. `*/5`).
    Step(u32),
}

impl CronField {
    /// Check if the field matches the given value.
    #[must_use]
    pub fn matches(&self, value: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Value(v) => *v == value,
            Self::List(values) => values.contains(&value),
            Self::Range(start, end) => value >= *start && value <= *end,
            Self::Step(step) => value % step == 0,
        }
    }

    /// Returns `true` for the `*` wildcard.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// A validated cron expression.
///
/// Immutable once parsed. The original text is retained and returned by
/// [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    source: String,
    minute: CronField,
    hour: CronField,
    day: CronField,
    month: CronField,
    weekday: CronField,
}

/// Cron expression parser.
#[derive(Debug)]
pub struct CronParser;

impl CronParser {
    /// Parse a cron expression string.
    ///
    /// # Examples
    ///
    /// - `0 0 * * *` - Daily at midnight
    /// - `*/5 * * * *` - Every 5 minutes
    /// - `30 14 * * 1-5` - 14:30 Monday through Friday
    pub fn parse(expr: &str) -> Result<CronExpression, CronError> {
        let parts: Vec<&str> = expr.split_whitespace().collect();
        if parts.len() != FieldKind::ALL.len() {
            return Err(CronError::FieldCount { found: parts.len() });
        }

        Ok(CronExpression {
            source: expr.trim().to_string(),
            minute: Self::parse_field(parts[0], FieldKind::Minute)?,
            hour: Self::parse_field(parts[1], FieldKind::Hour)?,
            day: Self::parse_field(parts[2], FieldKind::DayOfMonth)?,
            month: Self::parse_field(parts[3], FieldKind::Month)?,
            weekday: Self::parse_field(parts[4], FieldKind::DayOfWeek)?,
        })
    }

    fn parse_field(field: &str, kind: FieldKind) -> Result<CronField, CronError> {
        let (min, max) = kind.bounds();
        let invalid = |reason: String| CronError::InvalidField {
            field: kind,
            value: field.to_string(),
            reason,
        };
        let in_range = |value: u32| -> Result<u32, CronError> {
            if value < min || value > max {
                Err(invalid(format!("value {value} outside {min}-{max}")))
            } else {
                Ok(value)
            }
        };

        if field == "*" {
            return Ok(CronField::Any);
        }

        if let Some(step_str) = field.strip_prefix("*/") {
            let step = parse_number(step_str).ok_or_else(|| invalid("invalid step".into()))?;
            if step == 0 || step > max {
                return Err(invalid(format!("step must be 1-{max}")));
            }
            return Ok(CronField::Step(step));
        }

        if field.contains(',') {
            let values = field
                .split(',')
                .map(|item| {
                    parse_number(item)
                        .ok_or_else(|| invalid(format!("invalid list item '{item}'")))
                        .and_then(in_range)
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(CronField::List(values));
        }

        if let Some((start, end)) = field.split_once('-') {
            let start = parse_number(start).ok_or_else(|| invalid("invalid range start".into()))?;
            let end = parse_number(end).ok_or_else(|| invalid("invalid range end".into()))?;
            let (start, end) = (in_range(start)?, in_range(end)?);
            if start > end {
                return Err(invalid(format!("range start {start} is after end {end}")));
            }
            return Ok(CronField::Range(start, end));
        }

        let value = parse_number(field).ok_or_else(|| invalid("not a number".into()))?;
        Ok(CronField::Value(in_range(value)?))
    }
}

/// Digits only; rejects signs and empty strings that `str::parse` would take.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CronParser::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl CronExpression {
    /// The parsed field at the given position.
    #[must_use]
    pub fn field(&self, kind: FieldKind) -> &CronField {
        match kind {
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.day,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.weekday,
        }
    }

    /// `Some(N)` when the expression is exactly `*/N * * * *`.
    #[must_use]
    pub fn minute_step(&self) -> Option<u32> {
        match self.minute {
            CronField::Step(step)
                if self.hour.is_any()
                    && self.day.is_any()
                    && self.month.is_any()
                    && self.weekday.is_any() =>
            {
                Some(step)
            }
            _ => None,
        }
    }

    /// Check if the cron expression matches the given time (to the minute).
    pub fn matches(&self, time: &DateTime<Utc>) -> bool {
        self.minute.matches(time.minute())
            && self.hour.matches(time.hour())
            && self.day.matches(time.day())
            && self.month.matches(time.month())
            && self.weekday.matches(time.weekday().num_days_from_sunday())
    }

    /// Estimate the next matching minute strictly after `after`.
    ///
    /// `*/N * * * *` is computed directly. Every other expression is
    /// scanned minute by minute for up to [`SEARCH_HORIZON_MINUTES`];
    /// `None` means no match within that window, which callers should
    /// present as "unknown" rather than as an error.
    pub fn next_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.minute_step() {
            Some(step) => next_step_minute(after, step),
            None => self.scan_after(after),
        }
    }

    fn scan_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut candidate = truncate_to_minute(after);
        for _ in 0..SEARCH_HORIZON_MINUTES {
            candidate = candidate.checked_add_signed(Duration::minutes(1))?;
            if self.matches(&candidate) {
                return Some(candidate);
            }
        }
        tracing::debug!(
            expression = %self.source,
            horizon_minutes = SEARCH_HORIZON_MINUTES,
            "No matching minute within search horizon"
        );
        None
    }
}

fn truncate_to_minute(time: &DateTime<Utc>) -> DateTime<Utc> {
    let secs = time.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(60), 0).unwrap_or(*time)
}

/// Next minute after `after` that is a multiple of `step`, rolling over
/// to minute 0 of the next hour. `None` past the end of representable time.
fn next_step_minute(after: &DateTime<Utc>, step: u32) -> Option<DateTime<Utc>> {
    let base = truncate_to_minute(after);
    let minute = base.minute();
    let next = (minute / step + 1) * step;
    let offset = if next >= 60 { 60 - minute } else { next - minute };
    base.checked_add_signed(Duration::minutes(i64::from(offset)))
}

/// Returns `true` if `expression` is a valid five-field cron expression.
pub fn validate(expression: &str) -> bool {
    CronParser::parse(expression).is_ok()
}

/// Next time `expression` fires strictly after `now`, truncated to the minute.
///
/// Returns `None` for invalid expressions and for expressions with no
/// match in the next 24 hours.
pub fn next_run_time(expression: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    CronParser::parse(expression).ok()?.next_after(&now)
}

/// [`next_run_time`] over epoch milliseconds.
pub fn next_run_time_millis(expression: &str, now_ms: i64) -> Option<i64> {
    let now = DateTime::from_timestamp_millis(now_ms)?;
    next_run_time(expression, now).map(|next| next.timestamp_millis())
}

/// Reject `*/N * * * *` expressions that fire more often than every
/// `min_minutes` minutes.
///
/// Only the minute-step idiom is constrained. Any other valid expression
/// passes; an invalid expression never does.
pub fn minimum_interval_satisfied(expression: &str, min_minutes: u32) -> bool {
    match CronParser::parse(expression) {
        Ok(expr) => expr.minute_step().is_none_or(|step| step >= min_minutes),
        Err(_) => false,
    }
}
