//! Structure-break order blocks.
//!
//! A bullish block forms when a close breaks above the most recent swing
//! high. The block is the bar with the lowest low between that swing and the
//! breaking bar (the latest such bar on ties), or the bar just before the
//! break when there is nothing in between. Bearish blocks mirror this with
//! swing lows, closes below them, and the highest high.
//!
//! Each swing can be broken only once. At most one block forms per bar: a
//! later break pointing at the same bar replaces the earlier block, and a
//! bearish block replaces a bullish one on the same bar.

use std::collections::BTreeMap;

use crate::components::order_block::{check_aligned, Formation, HeuristicError, OrderBlockHeuristic};
use crate::domain::{label_indices, Bar, Direction, SwingLabel};

#[derive(Debug, Clone, Default)]
pub struct StructureBreakBlocks;

/// Did `close` break through a swing `level`? Long breaks above, Short below.
fn breaks_level(direction: Direction, close: f64, level: f64) -> bool {
    match direction {
        Direction::Long => close > level,
        Direction::Short => close < level,
    }
}

/// Latest bar in `start..end` with the lowest low (Long) or highest high (Short).
///
/// `None` when the range is empty or holds a NaN extreme.
fn extreme_bar(bars: &[Bar], start: usize, end: usize, direction: Direction) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, bar) in bars.iter().enumerate().take(end).skip(start) {
        let value = match direction {
            Direction::Long => bar.low,
            Direction::Short => bar.high,
        };
        if value.is_nan() {
            return None;
        }
        let better = match (best, direction) {
            (None, _) => true,
            (Some((_, b)), Direction::Long) => value <= b,
            (Some((_, b)), Direction::Short) => value >= b,
        };
        if better {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

fn scan_direction(
    bars: &[Bar],
    swings: &[SwingLabel],
    direction: Direction,
) -> BTreeMap<usize, Formation> {
    let anchor_kind = match direction {
        Direction::Long => SwingLabel::High,
        Direction::Short => SwingLabel::Low,
    };
    let anchors = label_indices(swings, anchor_kind);
    let mut consumed = vec![false; bars.len()];
    let mut by_bar: BTreeMap<usize, Formation> = BTreeMap::new();

    for (i, bar) in bars.iter().enumerate() {
        // last anchor strictly before i
        let pos = anchors.partition_point(|&a| a < i);
        if pos == 0 {
            continue;
        }
        let anchor = anchors[pos - 1];
        if consumed[anchor] {
            continue;
        }
        match anchor_kind.level(&bars[anchor]) {
            Some(level) if breaks_level(direction, bar.close, level) => {}
            _ => continue,
        }
        consumed[anchor] = true;

        let block = if i - anchor > 1 {
            extreme_bar(bars, anchor + 1, i, direction).unwrap_or(i - 1)
        } else {
            i - 1
        };

        by_bar.insert(
            block,
            Formation {
                direction,
                formation_index: block,
                confirmation_index: i,
                top: bars[block].high,
                bottom: bars[block].low,
            },
        );
    }

    by_bar
}

impl OrderBlockHeuristic for StructureBreakBlocks {
    fn name(&self) -> &str {
        "structure_break_blocks"
    }

    fn detect(
        &self,
        bars: &[Bar],
        swings: &[SwingLabel],
    ) -> Result<Vec<Formation>, HeuristicError> {
        check_aligned(bars, swings)?;

        // one block per bar, Short written last
        let mut by_bar = scan_direction(bars, swings, Direction::Long);
        by_bar.extend(scan_direction(bars, swings, Direction::Short));
        let formations: Vec<Formation> = by_bar.into_values().collect();

        log::trace!(
            "{}: {} formations over {} bars",
            self.name(),
            formations.len(),
            bars.len()
        );
        Ok(formations)
    }
}
