//! HTTP server setup and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::config::AppConfig;
use crate::logging::OpTimer;
use crate::{log_banner, log_init_step, log_init_warning, log_success, AppState};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the application with all routes and middleware.
pub fn create_app(config: AppConfig) -> Router {
    let overall_timer = OpTimer::new("server", "create_app");

    log_banner!(
        format!("statuspage-api v{VERSION}"),
        format!("Configured for {}", config.server.bind_address())
    );

    // [1/2] Schedule settings
    let min_interval = config.schedule.min_interval_minutes;
    log_init_step!(
        1,
        2,
        "Schedule",
        format!("minute-step floor {min_interval}m")
    );
    if min_interval < 5 {
        log_init_warning!(
            "Minute-step floor of {}m is below the 5 minute minimum GitHub Actions enforces",
            min_interval
        );
    }

    let timeout = Duration::from_secs(config.server.timeout_secs);
    let state = AppState {
        config: Arc::new(config),
    };

    // [2/2] Router
    let step_timer = OpTimer::new("server", "router");
    let app = api::create_router()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    log_init_step!(2, 2, "Router", "Routes + middleware configured");
    step_timer.finish();

    overall_timer.finish();
    log_success!("statuspage-api server created");

    app
}
