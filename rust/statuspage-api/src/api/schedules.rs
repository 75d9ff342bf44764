//! Schedule preview endpoints.
//!
//! The admin dashboard calls these while a job's schedule is being edited:
//! to label it, show the next run, and gate submission to the job API.
//! Nothing here stores or triggers jobs.

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::scheduler::{self, SimpleSchedule};
use crate::AppState;

/// Create the schedules router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/schedules/preview", post(preview_schedule))
        .route("/api/schedules/compose", post(compose_schedule))
        .route("/api/schedules/detect", post(detect_schedule))
}

/// Request to preview a cron expression.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    /// Cron expression as typed by the user.
    pub expression: String,
    /// Minute-step floor; defaults to `schedule.min_interval_minutes`.
    pub min_interval_minutes: Option<u32>,
    /// Reference time; defaults to the server clock.
    pub now: Option<DateTime<Utc>>,
}

/// Preview of a cron expression.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    /// The expression, echoed back.
    pub expression: String,
    /// Whether the expression parses.
    pub valid: bool,
    /// Friendly label, or the expression itself.
    pub description: String,
    /// Next run (RFC 3339), or `null` when invalid or more than 24h away.
    pub next_run_at: Option<String>,
    /// Next run in epoch milliseconds.
    pub next_run_ms: Option<i64>,
    /// Whether the minute-step floor is respected.
    pub interval_ok: bool,
    /// The floor that was applied.
    pub min_interval_minutes: u32,
}

/// Preview a cron expression.
///
/// # Endpoint
///
/// `POST /api/schedules/preview`
///
/// Always answers 200; an unparseable expression yields `valid: false`.
pub async fn preview_schedule(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let now = req.now.unwrap_or_else(Utc::now);
    let min_interval = req
        .min_interval_minutes
        .unwrap_or(state.config.schedule.min_interval_minutes);

    let valid = scheduler::validate(&req.expression);
    let next_run = scheduler::next_run_time(&req.expression, now);
    let interval_ok = scheduler::minimum_interval_satisfied(&req.expression, min_interval);

    tracing::debug!(
        expression = %req.expression,
        valid,
        interval_ok,
        has_next_run = next_run.is_some(),
        "Previewed schedule"
    );

    Json(PreviewResponse {
        description: scheduler::describe(&req.expression),
        expression: req.expression,
        valid,
        next_run_at: next_run.map(|dt| dt.to_rfc3339()),
        next_run_ms: next_run.map(|dt| dt.timestamp_millis()),
        interval_ok,
        min_interval_minutes: min_interval,
    })
}

/// Request to compose a schedule from the simple form.
#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    /// The form selection.
    #[serde(flatten)]
    pub schedule: SimpleSchedule,
    /// Reference time; defaults to the server clock.
    pub now: Option<DateTime<Utc>>,
}

/// A composed schedule.
#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    /// Rendered cron expression.
    pub expression: String,
    /// Friendly label.
    pub description: String,
    /// Next run (RFC 3339), if within 24 hours.
    pub next_run_at: Option<String>,
}

/// Turn a simple-form selection into a cron expression.
///
/// # Endpoint
///
/// `POST /api/schedules/compose`
pub async fn compose_schedule(
    Json(req): Json<ComposeRequest>,
) -> Result<Json<ComposeResponse>, ApiError> {
    let expression = req.schedule.to_expression()?;
    let now = req.now.unwrap_or_else(Utc::now);
    let next_run = scheduler::next_run_time(&expression, now);

    Ok(Json(ComposeResponse {
        description: scheduler::describe(&expression),
        next_run_at: next_run.map(|dt| dt.to_rfc3339()),
        expression,
    }))
}

/// Request to detect the simple-form selection of an expression.
#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Cron expression to inspect.
    pub expression: String,
}

/// Detected selection.
#[derive(Debug, Serialize)]
pub struct DetectResponse {
    /// The expression, echoed back.
    pub expression: String,
    /// Form selection, or `null` if the advanced editor is needed.
    pub schedule: Option<SimpleSchedule>,
}

/// Detect which simple-form selection produced an expression.
///
/// # Endpoint
///
/// `POST /api/schedules/detect`
pub async fn detect_schedule(Json(req): Json<DetectRequest>) -> Json<DetectResponse> {
    Json(DetectResponse {
        schedule: SimpleSchedule::detect(&req.expression),
        expression: req.expression,
    })
}
