//! Signal evaluation: the two rule variants and the engine facade.

pub mod confluence;
pub mod engine;
pub mod rejection;
pub mod strength;

pub use confluence::{evaluate_confluence, ConfluenceConfig};
pub use engine::{SignalEngine, SignalRule, MIN_CANDLES};
pub use rejection::{evaluate_rejection, RejectionConfig};
