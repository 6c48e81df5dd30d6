//! Swing highs and lows over a centred window.
//!
//! A bar is a swing high when its high is the maximum of
//! `high[t-L+1..=t+L]`, and a swing low when its low is the minimum of
//! `low[t-L+1..=t+L]` (high wins when both hold). Runs of same-kind swings
//! are then thinned down to the most extreme one, and the first and last bars
//! are tagged with the opposite of the nearest surviving swing so the
//! structure always opens and closes with a leg.
//!
//! Bars without a full window on both sides are never labelled.

use crate::components::swing_detector::{SwingDetector, SwingError};
use crate::domain::{Bar, SwingLabel};

#[derive(Debug, Clone, Default)]
pub struct SwingHighsLows;

/// `value == max(window)`; false whenever the window holds a NaN.
fn is_window_max(value: f64, window: impl Iterator<Item = f64>) -> bool {
    let mut max_val = f64::NEG_INFINITY;
    for v in window {
        if v.is_nan() {
            return false;
        }
        if v > max_val {
            max_val = v;
        }
    }
    value == max_val
}

fn is_window_min(value: f64, window: impl Iterator<Item = f64>) -> bool {
    let mut min_val = f64::INFINITY;
    for v in window {
        if v.is_nan() {
            return false;
        }
        if v < min_val {
            min_val = v;
        }
    }
    value == min_val
}

fn labelled_positions(labels: &[SwingLabel]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_some())
        .map(|(i, _)| i)
        .collect()
}

/// Drop the weaker of every adjacent same-kind pair until none remain.
///
/// Each round decides all drops against the same snapshot of labels.
fn thin_consecutive(bars: &[Bar], labels: &mut [SwingLabel]) {
    loop {
        let positions = labelled_positions(labels);
        if positions.len() < 2 {
            return;
        }

        let mut remove = vec![false; positions.len()];
        for k in 0..positions.len() - 1 {
            let (a, b) = (positions[k], positions[k + 1]);
            match (labels[a], labels[b]) {
                (SwingLabel::High, SwingLabel::High) => {
                    if bars[a].high < bars[b].high {
                        remove[k] = true;
                    } else {
                        remove[k + 1] = true;
                    }
                }
                (SwingLabel::Low, SwingLabel::Low) => {
                    if bars[a].low > bars[b].low {
                        remove[k] = true;
                    } else {
                        remove[k + 1] = true;
                    }
                }
                _ => {}
            }
        }

        if !remove.iter().any(|&r| r) {
            return;
        }
        for (k, &pos) in positions.iter().enumerate() {
            if remove[k] {
                labels[pos] = SwingLabel::None;
            }
        }
    }
}

impl SwingDetector for SwingHighsLows {
    fn name(&self) -> &str {
        "swing_highs_lows"
    }

    fn detect(&self, bars: &[Bar], lookback: usize) -> Result<Vec<SwingLabel>, SwingError> {
        if lookback == 0 {
            return Err(SwingError::InvalidLookback(lookback));
        }

        let n = bars.len();
        let mut labels = vec![SwingLabel::None; n];

        let first = lookback.saturating_mul(2) - 1;
        for i in first..n {
            if i + lookback >= n {
                break;
            }
            let window = &bars[i + 1 - lookback..=i + lookback];
            if is_window_max(bars[i].high, window.iter().map(|b| b.high)) {
                labels[i] = SwingLabel::High;
            } else if is_window_min(bars[i].low, window.iter().map(|b| b.low)) {
                labels[i] = SwingLabel::Low;
            }
        }

        thin_consecutive(bars, &mut labels);

        let positions = labelled_positions(&labels);
        if let (Some(&first_pos), Some(&last_pos)) = (positions.first(), positions.last()) {
            labels[0] = labels[first_pos].opposite();
            labels[n - 1] = labels[last_pos].opposite();
        }

        log::trace!(
            "{}: lookback={lookback} bars={n} swings={}",
            self.name(),
            labelled_positions(&labels).len()
        );

        Ok(labels)
    }
}
