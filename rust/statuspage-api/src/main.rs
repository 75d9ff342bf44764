//! statuspage-api entry point.
//!
//! `serve` (the default) runs the schedule preview API; `inspect` checks a
//! single cron expression from the command line.

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use statuspage_api::config::AppConfig;
use statuspage_api::logging::{init_tracing, OpTimer};
use statuspage_api::scheduler;
use statuspage_api::server::create_app;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "statuspage-api")]
#[command(about = "Cron schedule preview API for the status page")]
#[command(version)]
struct Args {
    /// Config file path.
    #[arg(short, long, env = "STATUSPAGE_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (overrides logging.level).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Host to bind to (overrides server.host).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port).
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate and describe a cron expression.
    Inspect {
        /// Five-field cron expression, quoted.
        expression: String,

        /// Minute-step floor (defaults to schedule.min_interval_minutes).
        #[arg(long)]
        min_interval: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    init_tracing(&config.logging)?;

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Inspect {
            expression,
            min_interval,
        } => {
            inspect(
                &expression,
                min_interval.unwrap_or(config.schedule.min_interval_minutes),
            );
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.server.bind_address();
    let app = create_app(config);

    let timer = OpTimer::new("server", "bind");
    let bound = tokio::net::TcpListener::bind(&addr).await;
    timer.finish_with_result(bound.as_ref());
    let listener = bound?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

#[allow(clippy::print_stdout, reason = "CLI output")]
fn inspect(expression: &str, min_interval: u32) {
    let valid = scheduler::validate(expression);
    println!("expression:  {expression}");
    println!("valid:       {valid}");
    if !valid {
        return;
    }
    println!("description: {}", scheduler::describe(expression));
    match scheduler::next_run_time(expression, chrono::Utc::now()) {
        Some(next) => println!("next run:    {}", next.to_rfc3339()),
        None => println!("next run:    unknown (not within 24h)"),
    }
    println!(
        "interval:    {} (floor {min_interval}m)",
        if scheduler::minimum_interval_satisfied(expression, min_interval) {
            "ok"
        } else {
            "too frequent"
        }
    );
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
