//! StochRSI: stochastic oscillator applied to the RSI series

use crate::indicators::momentum::rsi::rsi_series;
use crate::models::Candle;

/// Calculate StochRSI in [0, 1]
///
/// Position of the latest RSI value within the min/max of the trailing
/// `stoch_period` RSI values. A flat RSI window has no defined position,
/// so it maps to the 0.5 midpoint.
pub fn calculate_stoch_rsi(candles: &[Candle], rsi_period: u32, stoch_period: u32) -> Option<f64> {
    if stoch_period == 0 {
        return None;
    }

    let series = rsi_series(candles, rsi_period);
    if series.len() < stoch_period as usize {
        return None;
    }

    let window = &series[series.len() - stoch_period as usize..];
    let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return Some(0.5);
    }

    let latest = *window.last()?;
    Some(((latest - min) / (max - min)).clamp(0.0, 1.0))
}

/// Calculate StochRSI with default periods (14, 14)
pub fn calculate_stoch_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_stoch_rsi(candles, 14, 14)
}
