//! Order block zones.
//!
//! A zone is created once by the identifier and afterwards only its
//! `mitigation_index` changes, written by the mitigation resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bar::Bar;

/// Directional bias of an order block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Bullish zone (demand).
    Long,
    /// Bearish zone (supply).
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

/// Which bar price invalidates a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationMode {
    /// Extremes: low for Long zones, high for Short zones.
    #[default]
    Wick,
    /// Closing price only.
    Close,
}

/// An order block zone at one structural scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBlockZone {
    pub direction: Direction,
    /// Index of the bar whose range defines the zone.
    pub formation_index: usize,
    pub top: f64,
    pub bottom: f64,
    /// Aggregate volume attributed to the formation.
    pub volume: f64,
    /// Relative-volume score fixed at creation.
    pub strength_percentage: f64,
    /// First bar that crossed back through the zone; `None` while unmitigated.
    pub mitigation_index: Option<usize>,
}

impl OrderBlockZone {
    pub fn is_mitigated(&self) -> bool {
        self.mitigation_index.is_some()
    }

    /// Index of the bar where the zone ends for reporting: the mitigation bar,
    /// or the last bar of the sequence while the zone is still open.
    pub fn end_index(&self, bar_count: usize) -> usize {
        self.mitigation_index
            .unwrap_or_else(|| bar_count.saturating_sub(1))
    }

    /// Does `bar` cross back through the zone under `mode`?
    ///
    /// Strict comparison: touching the boundary does not mitigate.
    pub fn is_breached_by(&self, bar: &Bar, mode: MitigationMode) -> bool {
        match (self.direction, mode) {
            (Direction::Long, MitigationMode::Wick) => bar.low < self.bottom,
            (Direction::Long, MitigationMode::Close) => bar.close < self.bottom,
            (Direction::Short, MitigationMode::Wick) => bar.high > self.top,
            (Direction::Short, MitigationMode::Close) => bar.close > self.top,
        }
    }

    /// False when any numeric core field is missing (NaN or infinite).
    pub fn has_core_fields(&self) -> bool {
        self.top.is_finite()
            && self.bottom.is_finite()
            && self.volume.is_finite()
            && self.strength_percentage.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(low: f64, high: f64, close: f64) -> Bar {
        Bar {
            time: "2024-01-02".parse().unwrap(),
            open: close,
            high,
            low,
            close,
            volume: 1.0,
        }
    }

    fn zone(direction: Direction) -> OrderBlockZone {
        OrderBlockZone {
            direction,
            formation_index: 0,
            top: 102.0,
            bottom: 100.0,
            volume: 300.0,
            strength_percentage: 50.0,
            mitigation_index: None,
        }
    }

    #[test]
    fn long_sorts_before_short() {
        assert!(Direction::Long < Direction::Short);
        assert_eq!(Direction::Short.to_string(), "Short");
    }

    #[test]
    fn long_zone_breach_by_wick_and_close() {
        let z = zone(Direction::Long);
        // wick pierces, close holds
        let b = bar(99.0, 103.0, 101.0);
        assert!(z.is_breached_by(&b, MitigationMode::Wick));
        assert!(!z.is_breached_by(&b, MitigationMode::Close));
        // touching the bottom is not a breach
        assert!(!z.is_breached_by(&bar(100.0, 103.0, 100.0), MitigationMode::Wick));
    }

    #[test]
    fn short_zone_breach_by_wick_and_close() {
        let z = zone(Direction::Short);
        let b = bar(99.0, 103.0, 101.0);
        assert!(z.is_breached_by(&b, MitigationMode::Wick));
        assert!(!z.is_breached_by(&b, MitigationMode::Close));
        assert!(z.is_breached_by(&bar(99.0, 104.0, 103.5), MitigationMode::Close));
    }

    #[test]
    fn end_index_defaults_to_last_bar() {
        let mut z = zone(Direction::Long);
        assert_eq!(z.end_index(10), 9);
        z.mitigation_index = Some(4);
        assert_eq!(z.end_index(10), 4);
    }

    #[test]
    fn nan_fields_are_missing() {
        let mut z = zone(Direction::Long);
        assert!(z.has_core_fields());
        z.volume = f64::NAN;
        assert!(!z.has_core_fields());
    }

    #[test]
    fn mitigation_mode_serde_names() {
        assert_eq!(serde_json::to_string(&MitigationMode::Close).unwrap(), "\"close\"");
        let m: MitigationMode = serde_json::from_str("\"wick\"").unwrap();
        assert_eq!(m, MitigationMode::Wick);
    }
}
