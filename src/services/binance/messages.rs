//! Wire formats for the Binance kline REST endpoint and websocket feed.

use crate::models::Candle;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

/// One row of the `/api/v3/klines` response:
/// `[open_time, open, high, low, close, volume, close_time, ...]`
/// with prices and volume encoded as strings.
#[derive(Debug, Clone)]
pub struct KlineRow {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl KlineRow {
    pub fn parse(row: &[Value]) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if row.len() < 6 {
            return Err(format!("kline row too short: {} fields", row.len()).into());
        }

        let open_time = row[0]
            .as_i64()
            .ok_or_else(|| format!("invalid open_time: {}", row[0]))?;

        Ok(Self {
            open_time,
            open: field_f64(&row[1], "open")?,
            high: field_f64(&row[2], "high")?,
            low: field_f64(&row[3], "low")?,
            close: field_f64(&row[4], "close")?,
            volume: field_f64(&row[5], "volume")?,
        })
    }

    pub fn into_candle(self) -> Result<Candle, Box<dyn std::error::Error + Send + Sync>> {
        let timestamp = DateTime::from_timestamp_millis(self.open_time)
            .ok_or_else(|| format!("open_time out of range: {}", self.open_time))?;
        Ok(Candle::new(
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            timestamp,
        ))
    }
}

/// Price fields arrive as strings, but tolerate plain numbers too.
fn field_f64(value: &Value, name: &str) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
    match value {
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| format!("invalid {}: {}", name, e).into()),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("invalid {}: {}", name, n).into()),
        other => Err(format!("invalid {}: {}", name, other).into()),
    }
}

/// `{"symbol": "...", "price": "..."}` from `/api/v3/ticker/price`.
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// Combined-stream envelope: `{"stream": "...", "data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct StreamEnvelope {
    pub stream: String,
    pub data: KlineEvent,
}

#[derive(Debug, Deserialize)]
pub struct KlineEvent {
    #[serde(rename = "e")]
    pub event: String,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub kline: KlinePayload,
}

#[derive(Debug, Deserialize)]
pub struct KlinePayload {
    #[serde(rename = "t")]
    pub open_time: i64,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "v")]
    pub volume: String,
    #[serde(rename = "x")]
    pub is_closed: bool,
}

impl KlinePayload {
    pub fn to_candle(&self) -> Result<Candle, Box<dyn std::error::Error + Send + Sync>> {
        let timestamp = DateTime::from_timestamp_millis(self.open_time)
            .ok_or_else(|| format!("open_time out of range: {}", self.open_time))?;
        Ok(Candle::new(
            self.open.parse().map_err(|e| format!("invalid open: {}", e))?,
            self.high.parse().map_err(|e| format!("invalid high: {}", e))?,
            self.low.parse().map_err(|e| format!("invalid low: {}", e))?,
            self.close.parse().map_err(|e| format!("invalid close: {}", e))?,
            self.volume
                .parse()
                .map_err(|e| format!("invalid volume: {}", e))?,
            timestamp,
        ))
    }
}
