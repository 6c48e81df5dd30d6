//! Order-block heuristic trait.
//!
//! The heuristic decides *where* zones form. Everything downstream
//! (volume, strength, mitigation, reporting) only packages its output.

use serde::Serialize;

use crate::domain::{Bar, Direction, SwingLabel};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeuristicError {
    #[error("swing labels cover {labels} bars but the sequence has {bars}")]
    LengthMismatch { labels: usize, bars: usize },
}

/// A zone candidate as found by the heuristic, before volume and mitigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formation {
    pub direction: Direction,
    /// Bar whose range defines the zone.
    pub formation_index: usize,
    /// Bar whose close broke the swing and confirmed the block.
    pub confirmation_index: usize,
    pub top: f64,
    pub bottom: f64,
}

/// Trait for order-block heuristics.
///
/// # Contract
/// Deterministic given identical inputs. Formations come back in ascending
/// `formation_index` order and each satisfies
/// `formation_index < confirmation_index < bars.len()`.
pub trait OrderBlockHeuristic: Send + Sync {
    fn name(&self) -> &str;

    fn detect(
        &self,
        bars: &[Bar],
        swings: &[SwingLabel],
    ) -> Result<Vec<Formation>, HeuristicError>;
}

/// Shared input guard: one label per bar.
pub fn check_aligned(bars: &[Bar], swings: &[SwingLabel]) -> Result<(), HeuristicError> {
    if bars.len() != swings.len() {
        return Err(HeuristicError::LengthMismatch {
            labels: swings.len(),
            bars: bars.len(),
        });
    }
    Ok(())
}
