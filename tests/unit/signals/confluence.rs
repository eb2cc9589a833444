//! Unit tests for the multi-indicator confluence rule

use bandwatch::models::{Candle, SignalDirection};
use bandwatch::signals::{evaluate_confluence, ConfluenceConfig};
use chrono::{TimeZone, Utc};

fn candle_at(i: usize, open: f64, close: f64) -> Candle {
    let ts = Utc.timestamp_opt(60 * i as i64, 0).unwrap();
    let high = open.max(close) + 0.1;
    let low = open.min(close) - 0.1;
    Candle::new(open, high, low, close, 1000.0, ts)
}

fn uptrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5;
            candle_at(i, close - 0.1, close)
        })
        .collect()
}

fn downtrend_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 200.0 - i as f64 * 0.5;
            candle_at(i, close + 0.1, close)
        })
        .collect()
}

#[test]
fn test_confluence_insufficient_data() {
    let candles = uptrend_candles(30);
    assert!(evaluate_confluence("BTCUSDT", &candles, &ConfluenceConfig::default()).is_none());
}

#[test]
fn test_confluence_uptrend_fires_up() {
    // Steady rise: close > EMA, RSI = 100, MACD above signal. StochRSI
    // sits at the 0.5 midpoint (flat RSI window), so 3 of 4 conditions
    // hold and confidence is exactly 75.
    let candles = uptrend_candles(60);
    let signal = evaluate_confluence("BTCUSDT", &candles, &ConfluenceConfig::default())
        .expect("should fire at the default threshold");

    assert_eq!(signal.direction, SignalDirection::Up);
    assert_eq!(signal.confidence, Some(75.0));
    assert_eq!(signal.reasons.len(), 3);
}

#[test]
fn test_confluence_downtrend_does_not_fire() {
    let candles = downtrend_candles(60);
    assert!(evaluate_confluence("BTCUSDT", &candles, &ConfluenceConfig::default()).is_none());
}

#[test]
fn test_confluence_respects_threshold() {
    let candles = uptrend_candles(60);
    let config = ConfluenceConfig {
        min_confidence: 80.0,
        ..ConfluenceConfig::default()
    };
    assert!(evaluate_confluence("BTCUSDT", &candles, &config).is_none());
}

#[test]
fn test_confluence_zero_threshold_always_reports() {
    let candles = downtrend_candles(60);
    let config = ConfluenceConfig {
        min_confidence: 0.0,
        ..ConfluenceConfig::default()
    };
    let signal = evaluate_confluence("BTCUSDT", &candles, &config).expect("threshold 0 fires");

    assert_eq!(signal.direction, SignalDirection::Down);
    assert_eq!(signal.confidence, Some(0.0));
    assert!(signal.reasons.is_empty());
}

#[test]
fn test_confluence_confidence_bounded_for_pathological_input() {
    // All-zero prices and volumes must not panic or escape [0, 100]
    let candles: Vec<Candle> = (0..60)
        .map(|i| {
            let ts = Utc.timestamp_opt(60 * i as i64, 0).unwrap();
            Candle::new(0.0, 0.0, 0.0, 0.0, 0.0, ts)
        })
        .collect();
    let config = ConfluenceConfig {
        min_confidence: 0.0,
        ..ConfluenceConfig::default()
    };
    let signal = evaluate_confluence("BTCUSDT", &candles, &config).expect("threshold 0 fires");

    let confidence = signal.confidence.unwrap();
    assert!((0.0..=100.0).contains(&confidence));
    // Zero close equals zero open: up candle by definition
    assert_eq!(signal.direction, SignalDirection::Up);
}

#[test]
fn test_confluence_direction_follows_candle_color() {
    // Rising market, but the last candle itself closes red: the score
    // still clears the threshold while direction flips down
    let mut candles = uptrend_candles(60);
    let last = candles.last_mut().unwrap();
    last.open = last.close + 0.2;

    let config = ConfluenceConfig {
        min_confidence: 0.0,
        ..ConfluenceConfig::default()
    };
    let signal = evaluate_confluence("BTCUSDT", &candles, &config).expect("threshold 0 fires");
    assert_eq!(signal.direction, SignalDirection::Down);
}
