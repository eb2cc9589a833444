use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a detected signal.
///
/// `Up` iff the triggering candle closed at or above its open, `Down`
/// otherwise, independent of whether a rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Up,
    Down,
}

impl std::fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalDirection::Up => write!(f, "UP"),
            SignalDirection::Down => write!(f, "DOWN"),
        }
    }
}

/// One condition that contributed to a signal, with its weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReason {
    pub description: String,
    pub weight: f64,
}

/// Strength score and derived risk levels for a band-rejection signal.
///
/// Score is clipped to [1, 10]. Stop-loss sits just above the upper band;
/// the two take-profit targets are the middle and lower bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthReport {
    pub score: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk_reward_1: f64,
    pub risk_reward_2: f64,
}

/// A detected signal for one pair. Transient: identity is the
/// (symbol, timestamp) tuple and nothing outlives the scan except the
/// per-pair last-alerted timestamp used to suppress duplicate notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalOutput {
    pub symbol: String,
    pub direction: SignalDirection,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<StrengthReport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub reasons: Vec<SignalReason>,
}

impl SignalOutput {
    pub fn new(
        symbol: String,
        direction: SignalDirection,
        timestamp: DateTime<Utc>,
        price: f64,
    ) -> Self {
        Self {
            symbol,
            direction,
            timestamp,
            price,
            confidence: None,
            strength: None,
            reasons: Vec::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_strength(mut self, strength: StrengthReport) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_reasons(mut self, reasons: Vec<SignalReason>) -> Self {
        self.reasons = reasons;
        self
    }

    /// `pair | direction | timestamp` line for stdout reporting.
    pub fn log_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.symbol,
            self.direction,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
