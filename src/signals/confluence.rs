//! Multi-indicator confluence rule: a confidence score from how many of
//! the bullish conditions agree.

use crate::indicators::momentum::{calculate_macd, calculate_rsi, calculate_stoch_rsi};
use crate::indicators::trend::calculate_ema;
use crate::models::{Candle, SignalDirection, SignalOutput, SignalReason};

#[derive(Debug, Clone)]
pub struct ConfluenceConfig {
    pub ema_period: u32,
    pub rsi_period: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
    pub stoch_period: u32,
    pub rsi_threshold: f64,
    pub stoch_threshold: f64,
    /// Minimum confidence (percent) for the signal to fire.
    pub min_confidence: f64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            ema_period: 10,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stoch_period: 14,
            rsi_threshold: 55.0,
            stoch_threshold: 0.5,
            min_confidence: 75.0,
        }
    }
}

/// Evaluate the confluence rule on the most recent candle of `candles`.
///
/// Confidence is the share of satisfied conditions among
/// {close > EMA, RSI > threshold, MACD line > signal line,
/// StochRSI > threshold}, scaled to a percentage. Direction comes from the
/// candle color and is independent of the score.
pub fn evaluate_confluence(
    symbol: &str,
    candles: &[Candle],
    config: &ConfluenceConfig,
) -> Option<SignalOutput> {
    let last = candles.last()?;

    let ema = calculate_ema(candles, config.ema_period)?;
    let rsi = calculate_rsi(candles, config.rsi_period)?;
    let macd = calculate_macd(candles, config.macd_fast, config.macd_slow, config.macd_signal)?;
    let stoch = calculate_stoch_rsi(candles, config.rsi_period, config.stoch_period)?;

    let mut reasons = Vec::new();
    let mut satisfied = 0u32;

    if last.close > ema {
        satisfied += 1;
        reasons.push(SignalReason {
            description: format!("Close {:.4} above EMA({}) {:.4}", last.close, config.ema_period, ema),
            weight: 0.25,
        });
    }
    if rsi > config.rsi_threshold {
        satisfied += 1;
        reasons.push(SignalReason {
            description: format!("RSI {:.2} above {:.0}", rsi, config.rsi_threshold),
            weight: 0.25,
        });
    }
    if macd.macd > macd.signal {
        satisfied += 1;
        reasons.push(SignalReason {
            description: format!("MACD {:.4} above signal {:.4}", macd.macd, macd.signal),
            weight: 0.25,
        });
    }
    if stoch > config.stoch_threshold {
        satisfied += 1;
        reasons.push(SignalReason {
            description: format!("StochRSI {:.2} above {:.2}", stoch, config.stoch_threshold),
            weight: 0.25,
        });
    }

    let confidence = (satisfied as f64 / 4.0 * 100.0).clamp(0.0, 100.0);
    if confidence < config.min_confidence {
        return None;
    }

    let direction = if last.close >= last.open {
        SignalDirection::Up
    } else {
        SignalDirection::Down
    };

    Some(
        SignalOutput::new(symbol.to_string(), direction, last.timestamp, last.close)
            .with_confidence(confidence)
            .with_reasons(reasons),
    )
}
