//! Binance REST client for historical klines and ticker prices.

use crate::models::Candle;
use crate::services::binance::messages::{KlineRow, TickerPrice};
use crate::services::market_data::MarketDataProvider;
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";

pub struct BinanceRestClient {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceRestClient {
    pub fn new() -> Self {
        Self::with_client(DEFAULT_BASE_URL.to_string(), reqwest::Client::new())
    }

    /// Injectable base URL and client, used by tests to point at a mock server.
    pub fn with_client(base_url: String, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }

    /// Fetch up to `limit` klines for a symbol/interval, oldest first.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/v3/klines", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<Vec<serde_json::Value>> = response.json().await?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            candles.push(KlineRow::parse(row)?.into_candle()?);
        }
        candles.sort_by_key(|c| c.timestamp);

        Ok(candles)
    }

    pub async fn get_ticker_price(
        &self,
        symbol: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/v3/ticker/price", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await?
            .error_for_status()?;

        let ticker: TickerPrice = response.json().await?;
        ticker
            .price
            .parse::<f64>()
            .map_err(|e| format!("invalid ticker price for {}: {}", ticker.symbol, e).into())
    }
}

impl Default for BinanceRestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// REST-backed provider: every `get_candles` call is a fresh fetch,
/// nothing is cached between scans.
pub struct BinanceMarketDataProvider {
    client: Arc<BinanceRestClient>,
    interval: String,
}

impl BinanceMarketDataProvider {
    pub fn new(interval: String) -> Self {
        Self {
            client: Arc::new(BinanceRestClient::new()),
            interval,
        }
    }

    pub fn with_rest_client(client: Arc<BinanceRestClient>, interval: String) -> Self {
        Self { client, interval }
    }
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        self.client.get_klines(symbol, &self.interval, limit).await
    }

    async fn get_latest_price(
        &self,
        symbol: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        self.client.get_ticker_price(symbol).await
    }
}
