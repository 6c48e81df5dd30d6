//! Mitigation resolution.
//!
//! A zone is mitigated by the first bar after its formation bar that crosses
//! back through it: below the bottom for Long zones, above the top for Short
//! zones, judged on wicks or closes depending on the run's mode. Scanning is
//! strictly forward, so the first crossing wins and
//! `mitigation_index > formation_index` always holds.

use crate::domain::{Bar, MitigationMode, OrderBlockZone};

/// Resolves `mitigation_index` for zones under one fixed mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MitigationResolver {
    mode: MitigationMode,
}

impl MitigationResolver {
    pub fn new(mode: MitigationMode) -> Self {
        Self { mode }
    }

    /// Index of the first bar after the formation that breaches `zone`.
    pub fn first_breach(&self, bars: &[Bar], zone: &OrderBlockZone) -> Option<usize> {
        let start = zone.formation_index + 1;
        bars.get(start..)?
            .iter()
            .position(|bar| zone.is_breached_by(bar, self.mode))
            .map(|offset| start + offset)
    }

    /// Recompute `mitigation_index` for every zone from scratch.
    ///
    /// Resolving an already-resolved set gives the same indices again.
    pub fn resolve(&self, bars: &[Bar], zones: &mut [OrderBlockZone]) {
        for zone in zones.iter_mut() {
            zone.mitigation_index = self.first_breach(bars, zone);
        }
        log::debug!(
            "resolved {} zones ({:?} mode): {} mitigated",
            zones.len(),
            self.mode,
            zones.iter().filter(|z| z.is_mitigated()).count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::indicators::make_bars_hl;

    fn long_zone(at: usize, bottom: f64) -> OrderBlockZone {
        OrderBlockZone {
            direction: Direction::Long,
            formation_index: at,
            top: bottom + 2.0,
            bottom,
            volume: 100.0,
            strength_percentage: 50.0,
            mitigation_index: None,
        }
    }

    #[test]
    fn long_zone_mitigated_by_first_lower_low() {
        // (high, low)
        let bars = make_bars_hl(&[(12.0, 10.0), (11.0, 8.0), (13.0, 9.0)]);
        let mut zones = vec![long_zone(0, 10.0)];
        MitigationResolver::new(MitigationMode::Wick).resolve(&bars, &mut zones);
        assert_eq!(zones[0].mitigation_index, Some(1));
    }

    #[test]
    fn long_zone_unmitigated_when_lows_hold() {
        let bars = make_bars_hl(&[(12.0, 10.0), (11.0, 10.5), (13.0, 10.2)]);
        let mut zones = vec![long_zone(0, 10.0)];
        MitigationResolver::new(MitigationMode::Wick).resolve(&bars, &mut zones);
        assert_eq!(zones[0].mitigation_index, None);
        assert_eq!(zones[0].end_index(bars.len()), 2);
    }

    #[test]
    fn formation_bar_itself_never_mitigates() {
        let bars = make_bars_hl(&[(12.0, 5.0), (13.0, 11.0)]);
        let zone = long_zone(0, 10.0);
        assert_eq!(MitigationResolver::default().first_breach(&bars, &zone), None);
    }

    #[test]
    fn close_mode_ignores_wicks() {
        // bar 1 wicks below 10 but closes at 10.5; bar 2 closes at 9.5
        let mut bars = make_bars_hl(&[(12.0, 10.0), (11.0, 9.0), (11.0, 9.0)]);
        bars[1].close = 10.5;
        bars[2].close = 9.5;
        let zone = long_zone(0, 10.0);
        let wick = MitigationResolver::new(MitigationMode::Wick);
        let close = MitigationResolver::new(MitigationMode::Close);
        assert_eq!(wick.first_breach(&bars, &zone), Some(1));
        assert_eq!(close.first_breach(&bars, &zone), Some(2));
    }

    #[test]
    fn short_zone_mitigated_by_higher_high() {
        let bars = make_bars_hl(&[(12.0, 10.0), (11.5, 9.0), (12.5, 10.0)]);
        let zone = OrderBlockZone {
            direction: Direction::Short,
            formation_index: 0,
            top: 12.0,
            bottom: 10.0,
            volume: 1.0,
            strength_percentage: 1.0,
            mitigation_index: None,
        };
        assert_eq!(MitigationResolver::default().first_breach(&bars, &zone), Some(2));
    }

    #[test]
    fn formation_at_last_bar_stays_open() {
        let bars = make_bars_hl(&[(12.0, 10.0), (11.0, 8.0)]);
        let zone = long_zone(1, 10.0);
        assert_eq!(MitigationResolver::default().first_breach(&bars, &zone), None);
        let past_end = long_zone(5, 10.0);
        assert_eq!(MitigationResolver::default().first_breach(&bars, &past_end), None);
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let bars = make_bars_hl(&[(12.0, 10.0), (11.0, 10.5), (13.0, 9.0), (14.0, 8.0)]);
        let mut zones = vec![long_zone(0, 10.0), long_zone(1, 10.5), long_zone(2, 7.0)];
        let resolver = MitigationResolver::default();
        resolver.resolve(&bars, &mut zones);
        let first: Vec<Option<usize>> = zones.iter().map(|z| z.mitigation_index).collect();
        resolver.resolve(&bars, &mut zones);
        let second: Vec<Option<usize>> = zones.iter().map(|z| z.mitigation_index).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![Some(2), Some(2), None]);
    }
}
