//! Status page schedule API.
//!
//! Cron-expression utilities for a self-hosted status page, plus a small
//! HTTP surface the admin dashboard uses to preview job schedules.
//!
//! - [`scheduler`]: validation, next-run estimation, descriptions, and the
//!   simple-schedule form model
//! - [`api`]: preview/compose/detect HTTP endpoints
//! - [`config`]: layered configuration and validation
//! - [`logging`]: tracing setup and startup helpers
//! - [`server`]: router and middleware assembly
//!
//! # Example
//!
//! ```rust
//! use statuspage_api::scheduler::{describe, minimum_interval_satisfied, validate};
//!
//! assert!(validate("*/5 * * * *"));
//! assert_eq!(describe("0 0 * * *"), "Daily at midnight");
//! assert!(!minimum_interval_satisfied("*/3 * * * *", 5));
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod scheduler;
pub mod server;

use std::sync::Arc;

use config::AppConfig;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
}
