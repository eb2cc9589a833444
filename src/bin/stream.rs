//! Bandwatch Stream
//!
//! Feed variant of the worker: consumes the websocket kline feed into a
//! bounded in-memory buffer and evaluates the buffered candles on a fixed
//! interval. No REST polling and no reconnection - if the feed drops, the
//! buffers stop growing until restart.

use bandwatch::config::AppConfig;
use bandwatch::logging;
use bandwatch::notify::WebhookNotifier;
use bandwatch::scanner::{ScanConfig, Scanner};
use bandwatch::services::binance::LiveFeed;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tokio::time::{interval, Duration};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    let env = bandwatch::config::get_environment();
    info!("Starting Bandwatch Stream");
    info!(environment = %env, "Environment");

    if config.symbols.is_empty() {
        return Err("SYMBOLS must list at least one pair".into());
    }

    info!(
        symbols = ?config.symbols,
        interval = %config.interval,
        "Subscribing to {} kline streams",
        config.symbols.len()
    );

    let feed = LiveFeed::connect(&config.symbols, &config.interval)
        .await
        .map_err(|e| format!("Failed to connect feed: {}", e))?;
    info!("Feed connected");

    // The forming candle sits at the back of the buffer; drop it before
    // evaluation. There are no per-pair requests to space out.
    let scan_config = ScanConfig {
        symbols: config.symbols.clone(),
        candle_limit: config.candle_limit,
        request_delay_ms: 0,
        drop_unclosed: true,
        rule: config.signal_rule(),
    };
    let scanner = Arc::new(Scanner::new(Arc::new(feed.provider()), scan_config));

    let notifier = config
        .webhook_url
        .as_ref()
        .map(|url| Arc::new(WebhookNotifier::new(url.clone())));

    let scan_scanner = scanner.clone();
    let scan_notifier = notifier.clone();
    let scan_interval = config.scan_interval_seconds.max(1);
    let eval_handle = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(scan_interval));
        // First tick fires immediately; the buffer is still warming up
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let signals = scan_scanner.scan_all().await;
            for signal in &signals {
                println!("[SIGNAL] {}", signal.log_line());
                if !scan_scanner.should_notify(signal).await {
                    continue;
                }
                if let Some(ref notifier) = scan_notifier {
                    notifier.notify(signal).await;
                }
            }
        }
    });

    info!("Stream started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down stream...");
            eval_handle.abort();
            feed.stop().await;
            info!("Stream stopped");
        }
    }

    Ok(())
}
