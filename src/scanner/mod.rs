//! Sequential scan over the configured pairs.
//!
//! Fetch failures and "no match" both collapse to "no signal" for the
//! caller: failures are logged and counted but never retried.

use crate::models::SignalOutput;
use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;
use crate::signals::{SignalEngine, SignalRule, MIN_CANDLES};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub symbols: Vec<String>,
    /// Candles requested per pair.
    pub candle_limit: usize,
    /// Pause between per-pair requests to stay under rate limits.
    pub request_delay_ms: u64,
    /// Drop the trailing candle before evaluation (it is still forming
    /// when fetched over REST).
    pub drop_unclosed: bool,
    pub rule: SignalRule,
}

pub struct Scanner {
    provider: Arc<dyn MarketDataProvider>,
    config: ScanConfig,
    metrics: Option<Arc<Metrics>>,
    last_alerted: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl Scanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: ScanConfig) -> Self {
        Self {
            provider,
            config,
            metrics: None,
            last_alerted: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.config.symbols
    }

    /// Scan every configured pair once, sequentially.
    pub async fn scan_all(&self) -> Vec<SignalOutput> {
        let start = Instant::now();
        let mut signals = Vec::new();

        for (i, symbol) in self.config.symbols.iter().enumerate() {
            if i > 0 && self.config.request_delay_ms > 0 {
                sleep(Duration::from_millis(self.config.request_delay_ms)).await;
            }
            if let Some(signal) = self.scan_symbol(symbol).await {
                signals.push(signal);
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics.scans_total.inc();
            metrics
                .scan_duration_seconds
                .observe(start.elapsed().as_secs_f64());
        }

        info!(
            pairs = self.config.symbols.len(),
            signals = signals.len(),
            "Scan complete: {} pairs, {} signals",
            self.config.symbols.len(),
            signals.len()
        );

        signals
    }

    /// Fetch and evaluate one pair. Any failure becomes "no signal".
    pub async fn scan_symbol(&self, symbol: &str) -> Option<SignalOutput> {
        let mut candles = match self
            .provider
            .get_candles(symbol, self.config.candle_limit)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Fetch failed for {}, skipping", symbol);
                if let Some(ref metrics) = self.metrics {
                    metrics.fetch_errors_total.inc();
                }
                return None;
            }
        };

        if self.config.drop_unclosed {
            candles.pop();
        }

        if candles.len() < MIN_CANDLES {
            debug!(
                symbol = %symbol,
                count = candles.len(),
                min = MIN_CANDLES,
                "Not enough candles for {} ({} < {})",
                symbol,
                candles.len(),
                MIN_CANDLES
            );
            return None;
        }

        let signal = SignalEngine::evaluate(symbol, &candles, &self.config.rule);
        if let Some(ref signal) = signal {
            if let Some(ref metrics) = self.metrics {
                metrics.signals_detected_total.inc();
            }
            info!(
                symbol = %symbol,
                direction = %signal.direction,
                "Signal detected: {}",
                signal.log_line()
            );
        }
        signal
    }

    /// Whether this signal should be notified, updating the per-pair
    /// last-alerted timestamp. A repeated trigger timestamp for the same
    /// pair is suppressed; the map lives for the process only.
    pub async fn should_notify(&self, signal: &SignalOutput) -> bool {
        let mut alerted = self.last_alerted.write().await;
        match alerted.get(&signal.symbol) {
            Some(last) if *last == signal.timestamp => false,
            _ => {
                alerted.insert(signal.symbol.clone(), signal.timestamp);
                true
            }
        }
    }
}
