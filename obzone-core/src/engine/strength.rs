//! Zone strength from the volume around the confirming break.
//!
//! The formation's volume is split into the two most recent bars up to and
//! including the break, and the bar before them. Strength is the smaller half
//! as a percentage of the larger one: 100 means the move was carried by
//! evenly matched participation, values near 0 mean one side dominated.

use serde::Serialize;

use crate::domain::Bar;

/// Volume attributed to a formation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormationVolume {
    /// `volume[c] + volume[c-1]` for confirmation bar `c`.
    pub recent: f64,
    /// `volume[c-2]`.
    pub prior: f64,
}

impl FormationVolume {
    /// Measure around `confirmation_index`. Bars before the start of the
    /// sequence contribute zero volume.
    pub fn measure(bars: &[Bar], confirmation_index: usize) -> Self {
        let vol = |offset: usize| -> f64 {
            confirmation_index
                .checked_sub(offset)
                .and_then(|i| bars.get(i))
                .map_or(0.0, |b| b.volume)
        };
        Self {
            recent: vol(0) + vol(1),
            prior: vol(2),
        }
    }

    pub fn total(&self) -> f64 {
        self.recent + self.prior
    }

    /// `min / max * 100`, or 100 when there was no volume at all.
    pub fn strength_percentage(&self) -> f64 {
        let max_vol = self.recent.max(self.prior);
        if max_vol == 0.0 {
            return 100.0;
        }
        self.recent.min(self.prior) / max_vol * 100.0
    }
}
