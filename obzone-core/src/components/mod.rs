//! Component traits: the pluggable collaborators of a scale pass.
//!
//! A pass is composed of two independent components:
//! - Swing detector: labels structural highs and lows for a lookback window
//! - Order-block heuristic: turns bars + swing labels into zone formations

pub mod order_block;
pub mod swing_detector;

pub use order_block::{check_aligned, Formation, HeuristicError, OrderBlockHeuristic};
pub use swing_detector::{SwingDetector, SwingError};
