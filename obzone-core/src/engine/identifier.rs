//! Order block identification: packages heuristic formations into zones.

use crate::components::{Formation, HeuristicError, OrderBlockHeuristic};
use crate::domain::{Bar, OrderBlockZone, SwingLabel};

use super::strength::FormationVolume;

/// Turn one formation into an unmitigated zone with volume and strength attached.
pub fn zone_from_formation(bars: &[Bar], formation: &Formation) -> OrderBlockZone {
    let volume = FormationVolume::measure(bars, formation.confirmation_index);
    OrderBlockZone {
        direction: formation.direction,
        formation_index: formation.formation_index,
        top: formation.top.max(formation.bottom),
        bottom: formation.top.min(formation.bottom),
        volume: volume.total(),
        strength_percentage: volume.strength_percentage(),
        mitigation_index: None,
    }
}

/// Run the heuristic over `bars` and `swings` and build candidate zones.
///
/// Formations pointing outside the bar sequence are dropped. The result is
/// in ascending formation order; no zone is mitigated yet.
pub fn identify(
    bars: &[Bar],
    swings: &[SwingLabel],
    heuristic: &dyn OrderBlockHeuristic,
) -> Result<Vec<OrderBlockZone>, HeuristicError> {
    let formations = heuristic.detect(bars, swings)?;

    let mut zones: Vec<OrderBlockZone> = formations
        .iter()
        .filter(|f| f.formation_index < f.confirmation_index && f.confirmation_index < bars.len())
        .map(|f| zone_from_formation(bars, f))
        .collect();
    zones.sort_by_key(|z| (z.formation_index, z.direction));

    log::debug!(
        "{} produced {} candidate zones from {} formations",
        heuristic.name(),
        zones.len(),
        formations.len()
    );
    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::indicators::{make_bars_ohlc, StructureBreakBlocks};

    /// Heuristic stub returning a fixed formation list.
    struct Fixed(Vec<Formation>);

    impl OrderBlockHeuristic for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn detect(
            &self,
            _bars: &[Bar],
            _swings: &[SwingLabel],
        ) -> Result<Vec<Formation>, HeuristicError> {
            Ok(self.0.clone())
        }
    }

    fn formation(direction: Direction, at: usize, confirm: usize) -> Formation {
        Formation {
            direction,
            formation_index: at,
            confirmation_index: confirm,
            top: 11.0,
            bottom: 9.0,
        }
    }

    #[test]
    fn packages_volume_and_strength() {
        let mut bars = make_bars_ohlc(&[(10.0, 11.0, 9.0, 10.0); 4]);
        bars[1].volume = 100.0;
        bars[2].volume = 200.0;
        bars[3].volume = 300.0;
        let stub = Fixed(vec![formation(Direction::Long, 2, 3)]);
        let zones = identify(&bars, &[SwingLabel::None; 4], &stub).unwrap();

        assert_eq!(zones.len(), 1);
        let z = &zones[0];
        assert_eq!(z.formation_index, 2);
        assert_eq!(z.volume, 600.0);
        assert_eq!(z.strength_percentage, 20.0);
        assert_eq!(z.mitigation_index, None);
    }

    #[test]
    fn inverted_range_is_normalised() {
        let bars = make_bars_ohlc(&[(10.0, 11.0, 9.0, 10.0); 3]);
        let mut f = formation(Direction::Short, 0, 1);
        f.top = 9.0;
        f.bottom = 11.0;
        let z = zone_from_formation(&bars, &f);
        assert!(z.top >= z.bottom);
        assert_eq!((z.bottom, z.top), (9.0, 11.0));
    }

    #[test]
    fn drops_out_of_range_and_sorts() {
        let bars = make_bars_ohlc(&[(10.0, 11.0, 9.0, 10.0); 5]);
        let stub = Fixed(vec![
            formation(Direction::Short, 3, 4),
            formation(Direction::Long, 1, 2),
            formation(Direction::Long, 2, 9), // confirmation past the end
            formation(Direction::Long, 3, 3), // not before its confirmation
        ]);
        let zones = identify(&bars, &[SwingLabel::None; 5], &stub).unwrap();
        let seen: Vec<(usize, Direction)> =
            zones.iter().map(|z| (z.formation_index, z.direction)).collect();
        assert_eq!(seen, vec![(1, Direction::Long), (3, Direction::Short)]);
    }

    #[test]
    fn propagates_heuristic_errors() {
        let bars = make_bars_ohlc(&[(10.0, 11.0, 9.0, 10.0); 3]);
        let err = identify(&bars, &[SwingLabel::None; 1], &StructureBreakBlocks).unwrap_err();
        assert!(matches!(err, HeuristicError::LengthMismatch { .. }));
    }
}
