//! Environment-based configuration. No config files and no CLI flags:
//! everything comes from env vars, loaded from `.env` by the binaries.

use crate::scanner::ScanConfig;
use crate::signals::{ConfluenceConfig, RejectionConfig, SignalRule};
use std::env;

const DEFAULT_SYMBOLS: &str = "BTCUSDT,ETHUSDT,SOLUSDT,XRPUSDT,DOGEUSDT";

/// Runtime environment name, from APP_ENV (default "sandbox").
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Which rule variant a deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Rejection,
    Confluence,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub symbols: Vec<String>,
    pub interval: String,
    pub candle_limit: usize,
    pub scan_interval_seconds: u64,
    pub request_delay_ms: u64,
    pub drop_unclosed: bool,
    pub rule_kind: RuleKind,
    pub confidence_threshold: f64,
    pub webhook_url: Option<String>,
    pub http_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let symbols = env::var("SYMBOLS")
            .unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rule_kind = match env::var("SIGNAL_RULE").as_deref() {
            Ok("confluence") => RuleKind::Confluence,
            _ => RuleKind::Rejection,
        };

        Self {
            symbols,
            interval: env::var("CANDLE_INTERVAL").unwrap_or_else(|_| "1m".to_string()),
            candle_limit: parse_env("CANDLE_LIMIT", 100),
            scan_interval_seconds: parse_env("SCAN_INTERVAL_SECONDS", 60),
            request_delay_ms: parse_env("REQUEST_DELAY_MS", 250),
            drop_unclosed: env::var("DROP_UNCLOSED")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            rule_kind,
            confidence_threshold: parse_env("CONFIDENCE_THRESHOLD", 75.0),
            webhook_url: env::var("WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
            http_port: parse_env("HTTP_PORT", 8080),
        }
    }

    pub fn signal_rule(&self) -> SignalRule {
        match self.rule_kind {
            RuleKind::Rejection => SignalRule::Rejection(RejectionConfig::default()),
            RuleKind::Confluence => SignalRule::Confluence(ConfluenceConfig {
                min_confidence: self.confidence_threshold,
                ..ConfluenceConfig::default()
            }),
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            symbols: self.symbols.clone(),
            candle_limit: self.candle_limit,
            request_delay_ms: self.request_delay_ms,
            drop_unclosed: self.drop_unclosed,
            rule: self.signal_rule(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
