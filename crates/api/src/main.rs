//! Slotwatch - booked-meeting reconciliation service
//!
//! Main entry point: loads configuration, starts the cron scheduler and
//! serves the HTTP API until a shutdown signal arrives.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slotwatch_api::utils::logging::{init_tracing, LogFormat};
use slotwatch_api::{build_router, AppContext};
use slotwatch_infra::config;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "slotwatch", version, about = "Reconciles booked meetings with conferencing sessions")]
struct Args {
    /// Configuration file (TOML or JSON). Probed locations are used when omitted.
    #[arg(short, long, env = "SLOTWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP port, overrides the configured value
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve the API without the cron scheduler
    #[arg(long)]
    no_scheduler: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be applied before clap reads env-backed flags
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing(LogFormat::from_env())?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let mut config = config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let ctx = AppContext::new(config).context("Failed to build application context")?;

    let mut scheduler = if ctx.config.schedule.enabled && !args.no_scheduler {
        let mut scheduler = ctx.scheduler();
        scheduler.start().await.context("Failed to start scheduler")?;
        Some(scheduler)
    } else {
        info!("Scheduler disabled");
        None
    };

    let host = ctx.config.server.host.clone();
    let port = ctx.config.server.port;
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    info!(%host, port, "Slotwatch listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.stop().await {
            warn!(error = %e, "Scheduler did not stop cleanly");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
