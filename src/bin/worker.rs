//! Bandwatch Worker
//!
//! Polls the REST API on a fixed interval, evaluates every configured
//! pair, prints signals, and optionally notifies a webhook. Exposes
//! /health and /metrics for monitoring.

use bandwatch::config::AppConfig;
use bandwatch::core::http::{start_server, AppState, HealthStatus};
use bandwatch::core::scheduler::ScanScheduler;
use bandwatch::logging;
use bandwatch::metrics::Metrics;
use bandwatch::notify::WebhookNotifier;
use bandwatch::scanner::Scanner;
use bandwatch::services::binance::BinanceMarketDataProvider;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    let env = bandwatch::config::get_environment();
    info!("Starting Bandwatch Worker");
    info!(environment = %env, "Environment");

    if config.scan_interval_seconds == 0 {
        return Err("SCAN_INTERVAL_SECONDS must be > 0 for worker".into());
    }
    if config.symbols.is_empty() {
        return Err("SYMBOLS must list at least one pair".into());
    }

    info!(
        interval = config.scan_interval_seconds,
        symbols = ?config.symbols,
        "Scanning {} pairs every {}s",
        config.symbols.len(),
        config.scan_interval_seconds
    );

    let metrics = Arc::new(Metrics::new()?);

    let provider = Arc::new(BinanceMarketDataProvider::new(config.interval.clone()));
    let scanner = Arc::new(
        Scanner::new(provider, config.scan_config()).with_metrics(metrics.clone()),
    );

    let notifier = config.webhook_url.as_ref().map(|url| {
        info!("Webhook notifications enabled");
        Arc::new(WebhookNotifier::new(url.clone()))
    });
    if notifier.is_none() {
        info!("No WEBHOOK_URL set - signals go to stdout only");
    }

    let scheduler = ScanScheduler::new(scanner, notifier, config.scan_interval_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?
        .with_metrics(metrics.clone());
    scheduler
        .start()
        .await
        .map_err(|e| format!("Failed to start scheduler: {}", e))?;

    // Health/metrics endpoint alongside the scan loop
    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: Arc::new(Instant::now()),
    };
    let http_port = config.http_port;
    tokio::spawn(async move {
        if let Err(e) = start_server(http_port, state).await {
            error!(error = %e, "HTTP server stopped");
        }
    });

    info!("Worker started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down worker...");
            scheduler.stop().await;
            info!("Worker stopped");
        }
    }

    Ok(())
}
