//! Websocket kline feed with a bounded in-memory buffer per symbol.
//!
//! One task consumes the socket and forwards parsed candles through a
//! queue; a second task appends them to the per-symbol buffers. Evaluation
//! reads the buffers through the provider and never touches the socket.
//! There is no reconnection: when the feed drops, the consumer logs and
//! ends, and the buffers simply stop growing.

use crate::models::Candle;
use crate::services::binance::messages::StreamEnvelope;
use crate::services::market_data::MarketDataProvider;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, warn};
use url::Url;

/// Keep only the most recent candles per symbol.
pub const BUFFER_CAPACITY: usize = 100;

const DEFAULT_WS_URL: &str = "wss://stream.binance.com:9443";
const QUEUE_CAPACITY: usize = 256;

struct FeedUpdate {
    symbol: String,
    candle: Candle,
}

type CandleBuffers = Arc<RwLock<HashMap<String, VecDeque<Candle>>>>;

pub struct LiveFeed {
    candles: CandleBuffers,
    latest_prices: Arc<RwLock<HashMap<String, f64>>>,
    handles: RwLock<Vec<tokio::task::JoinHandle<()>>>,
}

impl LiveFeed {
    /// Connect to the combined kline stream for the given symbols.
    ///
    /// Subscriptions are fixed at connect time; there is no resubscribe.
    pub async fn connect(
        symbols: &[String],
        interval: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::connect_to(DEFAULT_WS_URL, symbols, interval).await
    }

    /// Connect against a specific websocket base URL.
    pub async fn connect_to(
        ws_base: &str,
        symbols: &[String],
        interval: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let streams: Vec<String> = symbols
            .iter()
            .map(|s| format!("{}@kline_{}", s.to_lowercase(), interval))
            .collect();
        let url = Url::parse(&format!("{}/stream?streams={}", ws_base, streams.join("/")))?;

        let (ws, _) = connect_async(url.as_str()).await?;

        let candles: CandleBuffers = Arc::new(RwLock::new(HashMap::new()));
        let latest_prices = Arc::new(RwLock::new(HashMap::new()));
        let (tx, rx) = mpsc::channel::<FeedUpdate>(QUEUE_CAPACITY);

        let reader = tokio::spawn(consume_socket(ws, tx));
        let writer = tokio::spawn(fill_buffers(rx, candles.clone(), latest_prices.clone()));

        Ok(Self {
            candles,
            latest_prices,
            handles: RwLock::new(vec![reader, writer]),
        })
    }

    /// Read-only view over the buffers for evaluation.
    pub fn provider(&self) -> LiveFeedProvider {
        LiveFeedProvider {
            candles: self.candles.clone(),
            latest_prices: self.latest_prices.clone(),
        }
    }

    pub async fn stop(&self) {
        let mut handles = self.handles.write().await;
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}

async fn consume_socket(
    mut ws: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    tx: mpsc::Sender<FeedUpdate>,
) {
    while let Some(message) = ws.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let envelope: StreamEnvelope = match serde_json::from_str(&text) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        debug!(error = %e, "Feed: skipping unrecognized message");
                        continue;
                    }
                };

                if envelope.data.event != "kline" {
                    continue;
                }

                match envelope.data.kline.to_candle() {
                    Ok(candle) => {
                        let update = FeedUpdate {
                            symbol: envelope.data.symbol,
                            candle,
                        };
                        if tx.send(update).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(stream = %envelope.stream, error = %e, "Feed: malformed kline update");
                    }
                }
            }
            Ok(Message::Ping(payload)) => {
                if let Err(e) = ws.send(Message::Pong(payload)).await {
                    warn!(error = %e, "Feed: failed to answer ping");
                    return;
                }
            }
            Ok(Message::Close(_)) => {
                warn!("Feed: server closed the connection");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Feed: websocket error, stopping consumer");
                return;
            }
        }
    }
    warn!("Feed: stream ended");
}

async fn fill_buffers(
    mut rx: mpsc::Receiver<FeedUpdate>,
    candles: CandleBuffers,
    latest_prices: Arc<RwLock<HashMap<String, f64>>>,
) {
    while let Some(update) = rx.recv().await {
        {
            let mut map = candles.write().await;
            let buffer = map.entry(update.symbol.clone()).or_default();

            // An update for an already-buffered open time replaces it
            buffer.retain(|c| c.timestamp != update.candle.timestamp);
            buffer.push_back(update.candle.clone());

            while buffer.len() > BUFFER_CAPACITY {
                buffer.pop_front();
            }
        }

        let mut prices = latest_prices.write().await;
        prices.insert(update.symbol, update.candle.close);
    }
}

/// Provider over the feed buffers. Returns whatever has been buffered so
/// far; an unknown symbol yields an empty window, not an error.
#[derive(Clone)]
pub struct LiveFeedProvider {
    candles: CandleBuffers,
    latest_prices: Arc<RwLock<HashMap<String, f64>>>,
}

#[async_trait]
impl MarketDataProvider for LiveFeedProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, Box<dyn std::error::Error + Send + Sync>> {
        let map = self.candles.read().await;
        let Some(buffer) = map.get(symbol) else {
            return Ok(Vec::new());
        };

        let mut result: Vec<Candle> = buffer.iter().cloned().collect();
        result.sort_by_key(|c| c.timestamp);
        if result.len() > limit {
            result.drain(..result.len() - limit);
        }
        Ok(result)
    }

    async fn get_latest_price(
        &self,
        symbol: &str,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let prices = self.latest_prices.read().await;
        prices
            .get(symbol)
            .copied()
            .ok_or_else(|| format!("no price received yet for {}", symbol).into())
    }
}
