//! Unit tests for StochRSI

use bandwatch::indicators::momentum::{calculate_stoch_rsi, calculate_stoch_rsi_default};
use bandwatch::models::Candle;
use chrono::Utc;

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .map(|&c| Candle::new(c, c, c, c, 1000.0, Utc::now()))
        .collect()
}

#[test]
fn test_stoch_rsi_insufficient_data() {
    let candles = candles_from_closes(&[100.0; 27]);
    assert!(calculate_stoch_rsi(&candles, 14, 14).is_none());
}

#[test]
fn test_stoch_rsi_flat_rsi_is_midpoint() {
    // Strictly rising closes pin RSI at 100 everywhere; a flat RSI
    // window has no defined position and maps to 0.5
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);
    assert_eq!(calculate_stoch_rsi(&candles, 14, 14), Some(0.5));
}

#[test]
fn test_stoch_rsi_recovery_hits_top_of_range() {
    // Decline then rally: the latest RSI is the max of its window
    let mut closes: Vec<f64> = (0..25).map(|i| 150.0 - i as f64).collect();
    closes.extend((0..25).map(|i| 126.0 + i as f64 * 2.0));
    let candles = candles_from_closes(&closes);
    let stoch = calculate_stoch_rsi(&candles, 14, 14).unwrap();
    assert!((stoch - 1.0).abs() < 1e-12);
}

#[test]
fn test_stoch_rsi_selloff_hits_bottom_of_range() {
    let mut closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
    closes.extend((0..25).map(|i| 124.0 - i as f64 * 2.0));
    let candles = candles_from_closes(&closes);
    let stoch = calculate_stoch_rsi(&candles, 14, 14).unwrap();
    assert!(stoch.abs() < 1e-12);
}

#[test]
fn test_stoch_rsi_always_in_unit_range() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + ((i * 13) % 17) as f64 - 8.0)
        .collect();
    let candles = candles_from_closes(&closes);
    let stoch = calculate_stoch_rsi_default(&candles).unwrap();
    assert!((0.0..=1.0).contains(&stoch));
}
