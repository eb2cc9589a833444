//! Prometheus metrics for the scanner and its HTTP surface.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,

    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,

    pub scans_total: IntCounter,
    pub scan_duration_seconds: Histogram,
    pub signals_detected_total: IntCounter,
    pub fetch_errors_total: IntCounter,
    pub notifications_sent_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounter::with_opts(Opts::new(
            "http_requests_total",
            "Total HTTP requests received",
        ))?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        let scans_total =
            IntCounter::with_opts(Opts::new("scans_total", "Completed full scans over all pairs"))?;
        let scan_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "scan_duration_seconds",
            "Duration of a full scan over all pairs",
        ))?;
        let signals_detected_total = IntCounter::with_opts(Opts::new(
            "signals_detected_total",
            "Signals that matched a rule",
        ))?;
        let fetch_errors_total = IntCounter::with_opts(Opts::new(
            "fetch_errors_total",
            "Candle fetches that failed or parsed badly",
        ))?;
        let notifications_sent_total = IntCounter::with_opts(Opts::new(
            "notifications_sent_total",
            "Webhook notifications dispatched",
        ))?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;
        registry.register(Box::new(signals_detected_total.clone()))?;
        registry.register(Box::new(fetch_errors_total.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            scans_total,
            scan_duration_seconds,
            signals_detected_total,
            fetch_errors_total,
            notifications_sent_total,
        })
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics not valid UTF-8: {}", e)))
    }
}
