//! Unit tests for EMA indicator

use bandwatch::indicators::trend::{calculate_ema, calculate_emas};
use bandwatch::models::Candle;
use chrono::Utc;

fn create_test_candles(count: usize, base_price: f64) -> Vec<Candle> {
    let mut candles = Vec::new();
    for i in 0..count {
        let price = base_price + (i as f64 * 0.1);
        candles.push(Candle::new(
            price,
            price + 0.05,
            price - 0.05,
            price,
            1000.0,
            Utc::now(),
        ));
    }
    candles
}

#[test]
fn test_ema_insufficient_data() {
    let candles = create_test_candles(10, 100.0);
    assert!(calculate_ema(&candles, 20).is_none());
}

#[test]
fn test_ema_sufficient_data() {
    let candles = create_test_candles(50, 100.0);
    let ema = calculate_ema(&candles, 12).unwrap();
    assert!(ema.is_finite());
    // EMA of a rising series lags the latest close
    assert!(ema < candles.last().unwrap().close);
}

#[test]
fn test_ema_constant_series() {
    let candles: Vec<Candle> = (0..30)
        .map(|_| Candle::new(50.0, 50.0, 50.0, 50.0, 1000.0, Utc::now()))
        .collect();
    let ema = calculate_ema(&candles, 10).unwrap();
    assert!((ema - 50.0).abs() < 1e-12);
}

#[test]
fn test_calculate_multiple_emas() {
    let candles = create_test_candles(250, 100.0);
    let periods = vec![12, 26, 50, 200];
    let emas = calculate_emas(&candles, &periods);
    assert_eq!(emas.len(), 4);
    assert!(emas.iter().all(|(_, v)| v.is_finite()));
}

#[test]
fn test_calculate_multiple_emas_skips_short_windows() {
    let candles = create_test_candles(30, 100.0);
    let emas = calculate_emas(&candles, &[12, 200]);
    assert_eq!(emas.len(), 1);
    assert_eq!(emas[0].0, 12);
}
