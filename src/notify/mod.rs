//! Fire-and-forget webhook notification for detected signals.

use crate::models::SignalOutput;
use serde_json::json;
use tracing::{debug, warn};

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// POST the signal to the webhook. Failures are logged and dropped;
    /// there is no retry and the caller never sees an error.
    pub async fn notify(&self, signal: &SignalOutput) {
        let mut payload = json!({
            "pair": signal.symbol,
            "direction": signal.direction.to_string(),
            "timestamp": signal.timestamp.to_rfc3339(),
            "price": signal.price,
        });
        if let Some(confidence) = signal.confidence {
            payload["confidence"] = json!(confidence);
        }
        if let Some(ref strength) = signal.strength {
            payload["strength"] = json!(strength.score);
        }

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(symbol = %signal.symbol, "Notified webhook for {}", signal.symbol);
            }
            Ok(response) => {
                warn!(
                    symbol = %signal.symbol,
                    status = %response.status(),
                    "Webhook rejected notification for {}",
                    signal.symbol
                );
            }
            Err(e) => {
                warn!(symbol = %signal.symbol, error = %e, "Webhook call failed for {}", signal.symbol);
            }
        }
    }
}
