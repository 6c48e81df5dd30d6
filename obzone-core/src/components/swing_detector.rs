//! Swing extrema provider trait.
//!
//! Providers are pure functions: bar history and a lookback window in, one
//! label per bar out. Each scale pass calls the provider with its own window.

use crate::domain::{Bar, SwingLabel};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwingError {
    #[error("swing lookback must be >= 1, got {0}")]
    InvalidLookback(usize),
}

/// Trait for swing extrema providers.
///
/// # Contract
/// Deterministic, no shared state, and the returned sequence has exactly
/// `bars.len()` entries, positionally aligned with `bars`.
pub trait SwingDetector: Send + Sync {
    /// Human-readable name (e.g., "swing_highs_lows").
    fn name(&self) -> &str;

    /// Label every bar as a swing high, swing low, or neither.
    fn detect(&self, bars: &[Bar], lookback: usize) -> Result<Vec<SwingLabel>, SwingError>;
}
