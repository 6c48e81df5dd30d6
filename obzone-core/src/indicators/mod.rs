//! Default collaborator implementations.
//!
//! `SwingHighsLows` implements `components::SwingDetector` and
//! `StructureBreakBlocks` implements `components::OrderBlockHeuristic`.
//! Both are pure: the same bars produce the same output on every call.

pub mod order_blocks;
pub mod swing_highs_lows;

pub use order_blocks::StructureBreakBlocks;
pub use swing_highs_lows::SwingHighsLows;

#[cfg(test)]
fn base_time(i: usize) -> crate::domain::BarTime {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    crate::domain::BarTime::Naive(base + chrono::Duration::hours(i as i64))
}

/// Create synthetic hourly bars from `(open, high, low, close)` tuples, volume 1000.
#[cfg(test)]
pub fn make_bars_ohlc(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| crate::domain::Bar {
            time: base_time(i),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Create synthetic bars from `(high, low)` pairs; open and close sit at the midpoint.
#[cfg(test)]
pub fn make_bars_hl(data: &[(f64, f64)]) -> Vec<crate::domain::Bar> {
    let ohlc: Vec<(f64, f64, f64, f64)> = data
        .iter()
        .map(|&(high, low)| {
            let mid = (high + low) / 2.0;
            (mid, high, low, mid)
        })
        .collect();
    make_bars_ohlc(&ohlc)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
