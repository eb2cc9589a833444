use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use bandwatch::core::http::{create_router, AppState, HealthStatus};
use bandwatch::metrics::Metrics;
use bandwatch::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper structure bundling together the HTTP server and mocked exchange.
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub exchange: MockServer,
    pub provider: Arc<BinanceMarketDataProvider>,
}

impl TestApp {
    pub async fn new() -> Self {
        let exchange = MockServer::start().await;

        let rest_client = Arc::new(BinanceRestClient::with_client(
            exchange.uri(),
            reqwest::Client::new(),
        ));
        let provider = Arc::new(BinanceMarketDataProvider::with_rest_client(
            rest_client,
            "1m".to_string(),
        ));

        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
        };

        let router = create_router(state);
        let server = TestServer::new(router).expect("start test server");

        Self {
            server,
            metrics,
            exchange,
            provider,
        }
    }
}

/// One kline row in the REST wire format:
/// `[open_time, open, high, low, close, volume, close_time]`
#[allow(dead_code)]
pub fn kline_row(open_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Value {
    json!([
        open_time,
        open.to_string(),
        high.to_string(),
        low.to_string(),
        close.to_string(),
        volume.to_string(),
        open_time + 59_999,
    ])
}

/// A run of quiet candles, one minute apart, all closing at `close`.
#[allow(dead_code)]
pub fn quiet_rows(count: usize, close: f64) -> Vec<Value> {
    (0..count)
        .map(|i| {
            kline_row(
                60_000 * i as i64,
                close,
                close + 0.05,
                close - 0.05,
                close,
                1000.0,
            )
        })
        .collect()
}

#[allow(dead_code)]
pub async fn mock_klines(server: &MockServer, symbol: &str, rows: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mock_ticker_price(server: &MockServer, symbol: &str, price: f64) {
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/price"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": symbol,
            "price": price.to_string(),
        })))
        .mount(server)
        .await;
}
