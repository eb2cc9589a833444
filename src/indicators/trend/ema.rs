//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::Candle;

/// Calculate the EMA of close prices for a specific period
pub fn calculate_ema(candles: &[Candle], period: u32) -> Option<f64> {
    if candles.len() < period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period as usize)
}

/// Calculate multiple EMAs at once
pub fn calculate_emas(candles: &[Candle], periods: &[u32]) -> Vec<(u32, f64)> {
    periods
        .iter()
        .filter_map(|&period| calculate_ema(candles, period).map(|v| (period, v)))
        .collect()
}
