//! Unit tests for the signal engine facade

use bandwatch::models::{Candle, SignalDirection};
use bandwatch::signals::{ConfluenceConfig, RejectionConfig, SignalEngine, SignalRule, MIN_CANDLES};
use chrono::{TimeZone, Utc};

fn quiet_candle(i: usize, close: f64) -> Candle {
    let ts = Utc.timestamp_opt(60 * i as i64, 0).unwrap();
    Candle::new(close, close + 0.05, close - 0.05, close, 1000.0, ts)
}

#[test]
fn test_engine_rejects_short_windows_for_both_rules() {
    let candles: Vec<Candle> = (0..MIN_CANDLES - 1).map(|i| quiet_candle(i, 100.0)).collect();

    let rejection = SignalRule::Rejection(RejectionConfig::default());
    let confluence = SignalRule::Confluence(ConfluenceConfig::default());

    assert!(SignalEngine::evaluate("BTCUSDT", &candles, &rejection).is_none());
    assert!(SignalEngine::evaluate("BTCUSDT", &candles, &confluence).is_none());
}

#[test]
fn test_engine_empty_input_is_no_signal() {
    let rule = SignalRule::Rejection(RejectionConfig::default());
    assert!(SignalEngine::evaluate("BTCUSDT", &[], &rule).is_none());
}

#[test]
fn test_engine_dispatches_rejection_rule() {
    let mut candles: Vec<Candle> = (0..20).map(|i| quiet_candle(i, 100.0)).collect();
    let ts = Utc.timestamp_opt(60 * 20, 0).unwrap();
    candles.push(Candle::new(103.0, 104.0, 101.0, 102.0, 5000.0, ts));

    let rule = SignalRule::Rejection(RejectionConfig::default());
    let signal = SignalEngine::evaluate("ETHUSDT", &candles, &rule).expect("spike should fire");
    assert_eq!(signal.symbol, "ETHUSDT");
    assert_eq!(signal.direction, SignalDirection::Down);
}

#[test]
fn test_engine_dispatches_confluence_rule() {
    let candles: Vec<Candle> = (0..60)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5;
            let ts = Utc.timestamp_opt(60 * i as i64, 0).unwrap();
            Candle::new(close - 0.1, close + 0.1, close - 0.2, close, 1000.0, ts)
        })
        .collect();

    let rule = SignalRule::Confluence(ConfluenceConfig::default());
    let signal = SignalEngine::evaluate("ETHUSDT", &candles, &rule).expect("uptrend should fire");
    assert_eq!(signal.direction, SignalDirection::Up);
    assert_eq!(signal.confidence, Some(75.0));
}

#[test]
fn test_engine_quiet_market_yields_nothing() {
    let candles: Vec<Candle> = (0..60).map(|i| quiet_candle(i, 100.0)).collect();

    let rejection = SignalRule::Rejection(RejectionConfig::default());
    let confluence = SignalRule::Confluence(ConfluenceConfig::default());

    assert!(SignalEngine::evaluate("BTCUSDT", &candles, &rejection).is_none());
    assert!(SignalEngine::evaluate("BTCUSDT", &candles, &confluence).is_none());
}
