//! One-shot scan: evaluate every configured pair once and print any
//! signals to stdout.

use bandwatch::config::AppConfig;
use bandwatch::logging;
use bandwatch::scanner::Scanner;
use bandwatch::services::binance::BinanceMarketDataProvider;
use dotenvy::dotenv;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    let provider = Arc::new(BinanceMarketDataProvider::new(config.interval.clone()));
    let scanner = Scanner::new(provider, config.scan_config());

    let signals = scanner.scan_all().await;

    if signals.is_empty() {
        println!("No signals detected.");
        return Ok(());
    }

    for signal in &signals {
        println!("[SIGNAL] {}", signal.log_line());
        if let Some(confidence) = signal.confidence {
            println!("  Confidence: {:.0}%", confidence);
        }
        if let Some(ref strength) = signal.strength {
            println!("  Strength: {:.1}/10", strength.score);
            println!(
                "  SL: {:.4} | TP1: {:.4} (R:R {:.2}) | TP2: {:.4} (R:R {:.2})",
                strength.stop_loss,
                strength.take_profit_1,
                strength.risk_reward_1,
                strength.take_profit_2,
                strength.risk_reward_2
            );
        }
        for reason in &signal.reasons {
            println!("  - {}", reason.description);
        }
    }

    Ok(())
}
