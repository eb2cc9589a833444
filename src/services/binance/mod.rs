//! Binance market data backends: REST klines and the websocket kline feed.

pub mod messages;
pub mod rest;
pub mod stream;

pub use rest::{BinanceMarketDataProvider, BinanceRestClient};
pub use stream::{LiveFeed, LiveFeedProvider, BUFFER_CAPACITY};
