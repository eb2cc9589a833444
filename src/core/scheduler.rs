//! Cron-based scheduler driving full scans on a fixed interval.

use crate::metrics::Metrics;
use crate::notify::WebhookNotifier;
use crate::scanner::Scanner;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Runs `Scanner::scan_all` on every cron tick and dispatches
/// notifications for new signals.
pub struct ScanScheduler {
    scanner: Arc<Scanner>,
    notifier: Option<Arc<WebhookNotifier>>,
    metrics: Option<Arc<Metrics>>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// Create a scheduler scanning every `interval_seconds`.
    ///
    /// `interval_seconds` of 0 disables the scheduler and is an error.
    pub fn new(
        scanner: Arc<Scanner>,
        notifier: Option<Arc<WebhookNotifier>>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        // Cron format: second minute hour day month weekday
        let cron_expr = if interval_seconds >= 60 {
            let minutes = interval_seconds / 60;
            format!("0 */{} * * * *", minutes)
        } else {
            format!("*/{} * * * * *", interval_seconds)
        };

        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "ScanScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            scanner,
            notifier,
            metrics: None,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Start the scheduler loop.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let scanner = self.scanner.clone();
        let notifier = self.notifier.clone();
        let metrics = self.metrics.clone();
        let schedule = self.schedule.clone();
        let handle_arc = self.handle.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                let signals = scanner.scan_all().await;

                for signal in &signals {
                    println!("[SIGNAL] {}", signal.log_line());

                    if !scanner.should_notify(signal).await {
                        continue;
                    }
                    if let Some(ref notifier) = notifier {
                        notifier.notify(signal).await;
                        if let Some(ref metrics) = metrics {
                            metrics.notifications_sent_total.inc();
                        }
                    }
                }
            }
        });

        {
            let mut h = handle_arc.write().await;
            *h = Some(handle);
        }

        info!("ScanScheduler: started successfully");
        Ok(())
    }

    /// Stop the scheduler.
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running.
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
