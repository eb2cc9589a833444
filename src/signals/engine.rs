//! Signal engine facade dispatching to the configured rule.

use crate::models::{Candle, SignalOutput};
use crate::signals::confluence::{evaluate_confluence, ConfluenceConfig};
use crate::signals::rejection::{evaluate_rejection, RejectionConfig};

/// Minimum window: the rolling band period plus the trigger candle.
/// Individual rules may need more and return `None` on their own.
pub const MIN_CANDLES: usize = 21;

/// Which rule variant a scan applies.
#[derive(Debug, Clone)]
pub enum SignalRule {
    Rejection(RejectionConfig),
    Confluence(ConfluenceConfig),
}

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate one pair's candle window against a rule.
    ///
    /// Pure function of its inputs: too little data means no signal,
    /// never an error.
    pub fn evaluate(symbol: &str, candles: &[Candle], rule: &SignalRule) -> Option<SignalOutput> {
        if candles.len() < MIN_CANDLES {
            return None;
        }

        match rule {
            SignalRule::Rejection(config) => evaluate_rejection(symbol, candles, config),
            SignalRule::Confluence(config) => evaluate_confluence(symbol, candles, config),
        }
    }
}
