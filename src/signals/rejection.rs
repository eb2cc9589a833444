//! Bollinger-band rejection rule: a red candle whose wick touched or
//! exceeded the upper band.

use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::{Candle, SignalDirection, SignalOutput, SignalReason};
use crate::signals::strength;

#[derive(Debug, Clone)]
pub struct RejectionConfig {
    pub period: u32,
    pub std_dev: f64,
}

impl Default for RejectionConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

/// Evaluate the rejection rule on the most recent candle of `candles`.
///
/// Fires when the candle is red and its high reached the upper band
/// (a tie counts as touching). Direction is always `Down`. Returns `None`
/// when the window is too short for the band.
pub fn evaluate_rejection(
    symbol: &str,
    candles: &[Candle],
    config: &RejectionConfig,
) -> Option<SignalOutput> {
    let period = config.period as usize;
    if candles.len() < period + 1 {
        return None;
    }

    let last = candles.last()?;
    let bands = calculate_bollinger_bands(candles, config.period, config.std_dev)?;
    if !bands.upper.is_finite() {
        return None;
    }

    if !last.is_red() || last.high < bands.upper {
        return None;
    }

    // Trailing average volume over the window before the trigger candle
    let prior = &candles[candles.len() - 1 - period..candles.len() - 1];
    let avg_volume = prior.iter().map(|c| c.volume).sum::<f64>() / period as f64;

    let report = strength::strength_report(last, &bands, avg_volume);
    let reasons = vec![
        SignalReason {
            description: format!(
                "Red candle: open={:.4}, close={:.4}",
                last.open, last.close
            ),
            weight: 0.5,
        },
        SignalReason {
            description: format!(
                "High {:.4} reached upper band {:.4}",
                last.high, bands.upper
            ),
            weight: 0.5,
        },
    ];

    Some(
        SignalOutput::new(
            symbol.to_string(),
            SignalDirection::Down,
            last.timestamp,
            last.close,
        )
        .with_strength(report)
        .with_reasons(reasons),
    )
}
