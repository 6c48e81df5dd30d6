//! Swing labels: per-bar structural extrema tags.

use serde::{Deserialize, Serialize};

use super::bar::Bar;

/// Tag attached to a single bar by a swing extrema provider.
///
/// Labels are sparse: most bars carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwingLabel {
    High,
    Low,
    #[default]
    None,
}

impl SwingLabel {
    pub fn is_some(&self) -> bool {
        !matches!(self, SwingLabel::None)
    }

    /// The opposite extreme. `None` stays `None`.
    pub fn opposite(&self) -> SwingLabel {
        match self {
            SwingLabel::High => SwingLabel::Low,
            SwingLabel::Low => SwingLabel::High,
            SwingLabel::None => SwingLabel::None,
        }
    }

    /// Price level of the swing on its bar: the high for a swing high,
    /// the low for a swing low.
    pub fn level(&self, bar: &Bar) -> Option<f64> {
        match self {
            SwingLabel::High => Some(bar.high),
            SwingLabel::Low => Some(bar.low),
            SwingLabel::None => None,
        }
    }
}

/// Ascending indices of all bars carrying `kind`.
pub fn label_indices(labels: &[SwingLabel], kind: SwingLabel) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| **l == kind)
        .map(|(i, _)| i)
        .collect()
}
