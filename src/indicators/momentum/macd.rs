//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::Candle;

#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of MACD
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<Macd> {
    if candles.len() < slow_period as usize + signal_period as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast_ema = math::ema(&closes, fast_period as usize)?;
    let slow_ema = math::ema(&closes, slow_period as usize)?;
    let macd_line = fast_ema - slow_ema;

    // Build the MACD series so the signal line can be an EMA of it
    let mut macd_values = Vec::new();
    let mut fast_ema_prev = math::sma(&closes[..fast_period as usize], fast_period as usize)?;
    let mut slow_ema_prev = math::sma(&closes[..slow_period as usize], slow_period as usize)?;

    for i in fast_period as usize..closes.len() {
        fast_ema_prev = math::ema_from_previous(closes[i], fast_ema_prev, fast_period as usize);

        if i >= slow_period as usize {
            slow_ema_prev = math::ema_from_previous(closes[i], slow_ema_prev, slow_period as usize);
            macd_values.push(fast_ema_prev - slow_ema_prev);
        }
    }

    if macd_values.len() < signal_period as usize {
        return None;
    }

    let signal_line = math::ema(&macd_values, signal_period as usize)?;
    let histogram = macd_line - signal_line;

    Some(Macd {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<Macd> {
    calculate_macd(candles, 12, 26, 9)
}
