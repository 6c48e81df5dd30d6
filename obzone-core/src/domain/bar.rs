//! Bar: the fundamental market data unit.

use serde::Serialize;

use super::time::BarTime;

/// One OHLCV record. Bars are identified by their position in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub time: BarTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLCV field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLC sanity check: high bounds the body from above, low from below.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BarError {
    #[error("bar {index} at {time} does not come after the previous bar at {previous}")]
    NotIncreasing {
        index: usize,
        time: BarTime,
        previous: BarTime,
    },
}

/// Check the sequence invariant: timestamps strictly increase with index.
pub fn validate_sequence(bars: &[Bar]) -> Result<(), BarError> {
    for (index, pair) in bars.windows(2).enumerate() {
        if pair[1].time.instant() <= pair[0].time.instant() {
            return Err(BarError::NotIncreasing {
                index: index + 1,
                time: pair[1].time,
                previous: pair[0].time,
            });
        }
    }
    Ok(())
}
