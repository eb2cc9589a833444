//! RSI (Relative Strength Index) indicator

use crate::models::Candle;

/// Calculate RSI from close prices
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<f64> {
    if candles.len() < period as usize + 1 {
        return None;
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    rsi_at(&closes, closes.len() - 1, period as usize)
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}

/// Rolling RSI series: one value per index from `period` onward.
///
/// Each entry depends only on closes at or before its index, so the series
/// can feed StochRSI without lookahead.
pub fn rsi_series(candles: &[Candle], period: u32) -> Vec<f64> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let period = period as usize;
    if closes.len() < period + 1 {
        return Vec::new();
    }

    (period..closes.len())
        .filter_map(|i| rsi_at(&closes, i, period))
        .collect()
}

/// RSI at index `i` over the `period` changes ending there.
fn rsi_at(closes: &[f64], i: usize, period: usize) -> Option<f64> {
    if period == 0 || i < period {
        return None;
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for j in (i - period + 1)..=i {
        let change = closes[j] - closes[j - 1];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += change.abs();
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}
