//! Error responses for the schedule API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::scheduler::CronError;

/// Errors returned by schedule endpoints.
///
/// Previewing a bad expression is not an error (the preview reports
/// `valid: false`); these are for requests that cannot be answered at all.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The composed schedule has an out-of-range selector.
    #[error(transparent)]
    InvalidSchedule(#[from] CronError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidSchedule(_) => "invalid_schedule",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSchedule(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting schedule request");
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
