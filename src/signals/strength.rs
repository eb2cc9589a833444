//! Strength scoring and risk levels for band-rejection signals.

use crate::indicators::volatility::BollingerBands;
use crate::models::{Candle, StrengthReport};

const BODY_WEIGHT: f64 = 0.3;
const WICK_WEIGHT: f64 = 0.3;
const DEPTH_WEIGHT: f64 = 0.2;
const VOLUME_WEIGHT: f64 = 0.2;

/// Stop-loss sits a fraction above the upper band.
const STOP_LOSS_BUFFER: f64 = 1.002;

/// Build the strength report for a rejection candle.
///
/// Score is a weighted sum of normalized body size, upper-wick ratio,
/// band-rejection depth, and the volume ratio against the trailing average,
/// clipped to [1, 10]. Risk levels: stop above the upper band, targets at
/// the middle and lower bands.
pub fn strength_report(candle: &Candle, bands: &BollingerBands, avg_volume: f64) -> StrengthReport {
    let range = candle.range();
    let body_ratio = safe_ratio(candle.body(), range);
    let wick_ratio = safe_ratio(candle.upper_wick(), range);

    let half_width = bands.upper - bands.middle;
    let depth = safe_ratio(candle.high - bands.upper, half_width);

    // Twice the trailing average volume scores as maximum
    let volume_score = safe_ratio(candle.volume, avg_volume * 2.0);

    let raw = BODY_WEIGHT * body_ratio
        + WICK_WEIGHT * wick_ratio
        + DEPTH_WEIGHT * depth
        + VOLUME_WEIGHT * volume_score;
    let score = (1.0 + 9.0 * raw).clamp(1.0, 10.0);

    let entry = candle.close;
    let stop_loss = bands.upper * STOP_LOSS_BUFFER;
    let take_profit_1 = bands.middle;
    let take_profit_2 = bands.lower;

    let risk = stop_loss - entry;
    let risk_reward_1 = reward_ratio(entry, take_profit_1, risk);
    let risk_reward_2 = reward_ratio(entry, take_profit_2, risk);

    StrengthReport {
        score,
        stop_loss,
        take_profit_1,
        take_profit_2,
        risk_reward_1,
        risk_reward_2,
    }
}

/// Ratio clamped to [0, 1]; zero when the denominator is not positive.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (numerator / denominator).clamp(0.0, 1.0)
}

/// Reward per unit of risk for a short from `entry` down to `target`.
fn reward_ratio(entry: f64, target: f64, risk: f64) -> f64 {
    if risk <= 0.0 || !risk.is_finite() {
        return 0.0;
    }
    ((entry - target) / risk).max(0.0)
}
