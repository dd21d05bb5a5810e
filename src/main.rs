//! # Sensor Board
//!
//! Watch a remote sensor feed, render a reading grid and raise low-battery
//! alerts.
//!
//! The daemon refreshes on a fixed interval, on SIGHUP (manual refresh) and
//! once at startup. A refresh fetches the feed, parses it into sensor
//! readings, renders the grid and dispatches a low-battery alert per flagged
//! sensor. Failed refreshes are logged as transient and leave the previous
//! grid in place.

use anyhow::Result;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{interval, Duration};
use tracing::{info, warn};
use tracing_subscriber;

mod alert;
mod config;
mod error;
mod feed;
mod pipeline;
mod presenter;

use alert::notifier::LogNotifier;
use config::Config;
use feed::client::HttpFeedClient;
use pipeline::{Pipeline, RefreshOutcome};
use presenter::GridPresenter;

/// Configuration file path when none is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for Sensor Board
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (first CLI argument, or the default path)
///    - Build the HTTP feed client, grid presenter and log notifier
///
/// 2. **Main Loop**
///    - Refresh on every interval tick (the first tick fires immediately)
///    - Refresh on SIGHUP, the manual-refresh signal
///    - Handle Ctrl+C for graceful shutdown
///
/// Refreshes run as spawned tasks so a slow fetch never blocks the loop;
/// the pipeline coalesces requests that arrive while one is in flight, and
/// a refresh still in flight at shutdown has its result dropped silently.
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or the HTTP client
/// cannot be built. Refresh failures are transient and only logged.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Sensor Board v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)?;
    info!("Loaded configuration from {}", config_path);

    let client = HttpFeedClient::new(&config.feed)?;
    info!("Watching feed at {}", client.url());

    let presenter = GridPresenter::new(config.display.columns);
    let notifier = LogNotifier::new();
    let pipeline = Arc::new(Pipeline::new(
        client,
        presenter,
        notifier,
        config.fields.clone(),
        config.alerts.clone(),
    ));

    let mut refresh_interval = interval(Duration::from_secs(config.feed.refresh_interval_s));
    let mut manual_refresh = signal(SignalKind::hangup())?;

    info!(
        "Refreshing every {}s; send SIGHUP for a manual refresh, Ctrl+C to exit",
        config.feed.refresh_interval_s
    );

    // Main loop
    loop {
        tokio::select! {
            // Periodic refresh; the interval's first tick is immediate,
            // which doubles as the startup refresh
            _ = refresh_interval.tick() => {
                spawn_refresh(pipeline.clone());
            }

            // Manual refresh, the headless pull-to-refresh
            _ = manual_refresh.recv() => {
                info!("Manual refresh requested");
                spawn_refresh(pipeline.clone());
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    Ok(())
}

/// Run one refresh in the background, logging the outcome
fn spawn_refresh(pipeline: Arc<Pipeline<HttpFeedClient, GridPresenter, LogNotifier>>) {
    tokio::spawn(async move {
        match pipeline.refresh().await {
            Ok(RefreshOutcome::Rendered { readings, alerts }) => {
                info!("Rendered {} readings, {} low battery alerts", readings, alerts);
            }
            Ok(RefreshOutcome::Coalesced) => {
                info!("Refresh already in flight, request coalesced");
            }
            // Transient: keep the previous grid, try again next tick
            Err(e) => warn!("Refresh failed: {}", e),
        }
    });
}
