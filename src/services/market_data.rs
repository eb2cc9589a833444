//! Market data provider interface shared by the REST and feed backends.

use crate::models::Candle;
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get up to `limit` most recent candles for a symbol, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>>;

    /// Get the latest traded price for a symbol.
    async fn get_latest_price(
        &self,
        symbol: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>>;
}
