//! Cron schedule utilities for the status page.
//!
//! The admin dashboard uses these to validate job schedules, preview the
//! next run, and label schedules in plain English. Actual triggering is
//! done elsewhere; everything here is a pure function of its inputs.

pub mod cron;
pub mod describe;
pub mod simple;

pub use cron::{
    minimum_interval_satisfied, next_run_time, next_run_time_millis, validate, CronError,
    CronExpression, CronField, CronParser, FieldKind, SEARCH_HORIZON_MINUTES,
};
pub use describe::{describe, Idiom};
pub use simple::SimpleSchedule;
