//! Report rendering: text summaries and JSON export of finalized zones.
//!
//! Zones are listed in ascending formation order. A zone whose numeric
//! fields are missing, or whose formation bar is outside the sequence, is
//! left out of the report entirely.

use serde::Serialize;
use std::fmt::Write;

use crate::config::Scale;
use crate::domain::{Bar, BarTime, Direction, MitigationMode, OrderBlockZone};
use crate::engine::{Analysis, ScaleResult};

/// Price as written in reports: always with a fractional part (`100.0`, `101.25`).
fn fmt_price(value: f64) -> String {
    format!("{value:?}")
}

fn reportable<'a>(bars: &[Bar], zones: &'a [OrderBlockZone]) -> Vec<&'a OrderBlockZone> {
    let mut kept: Vec<&OrderBlockZone> = zones
        .iter()
        .filter(|z| z.has_core_fields() && z.formation_index < bars.len())
        .collect();
    kept.sort_by_key(|z| (z.formation_index, z.direction));
    kept
}

fn end_time<'a>(bars: &'a [Bar], zone: &OrderBlockZone) -> &'a BarTime {
    let end = zone.end_index(bars.len()).min(bars.len() - 1);
    &bars[end].time
}

/// Append one zone block.
fn write_zone(out: &mut String, bars: &[Bar], zone: &OrderBlockZone, prefix: &str) {
    let start = &bars[zone.formation_index].time;
    let end = end_time(bars, zone);
    // writing to a String cannot fail
    let _ = writeln!(out, "{prefix} {} Zone:", zone.direction);
    let _ = writeln!(out, "  Start Time: {start}");
    let _ = writeln!(out, "  End Time:   {end}");
    let _ = writeln!(
        out,
        "  Price Range: {} to {}",
        fmt_price(zone.bottom),
        fmt_price(zone.top)
    );
    let _ = writeln!(out, "  OB Volume:  {:.1}", zone.volume);
    let _ = writeln!(out, "  Percentage: {:.1}%", zone.strength_percentage.trunc());
    out.push('\n');
}

/// Body of one scale section: every reportable zone, blank-line separated.
pub fn render_zones(bars: &[Bar], zones: &[OrderBlockZone], scale: Scale) -> String {
    let mut out = String::new();
    for zone in reportable(bars, zones) {
        write_zone(&mut out, bars, zone, scale.zone_prefix());
    }
    out
}

/// Full text report: the internal section, then the swing section.
///
/// A failed scale renders as an empty body.
pub fn render_report(bars: &[Bar], analysis: &Analysis) -> String {
    let mut out = String::new();
    for result in analysis.scales() {
        out.push_str(result.scale.heading());
        out.push('\n');
        out.push_str(&render_zones(bars, result.zones(), result.scale));
        out.push('\n');
    }
    out
}

// ─── JSON export ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ZoneRecord<'a> {
    pub direction: Direction,
    pub formation_index: usize,
    pub mitigation_index: Option<usize>,
    pub start_time: &'a BarTime,
    pub end_time: &'a BarTime,
    pub top: f64,
    pub bottom: f64,
    pub volume: f64,
    pub strength_percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScaleRecord<'a> {
    Zones(Vec<ZoneRecord<'a>>),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct AnalysisRecord<'a> {
    pub mitigation_mode: MitigationMode,
    pub internal: ScaleRecord<'a>,
    pub swing: ScaleRecord<'a>,
}

fn scale_record<'a>(bars: &'a [Bar], result: &ScaleResult) -> ScaleRecord<'a> {
    if let Some(e) = result.error() {
        return ScaleRecord::Failed {
            error: e.to_string(),
        };
    }
    let zones = reportable(bars, result.zones())
        .into_iter()
        .map(|z| ZoneRecord {
            direction: z.direction,
            formation_index: z.formation_index,
            mitigation_index: z.mitigation_index,
            start_time: &bars[z.formation_index].time,
            end_time: end_time(bars, z),
            top: z.top,
            bottom: z.bottom,
            volume: z.volume,
            strength_percentage: z.strength_percentage,
        })
        .collect();
    ScaleRecord::Zones(zones)
}

/// Borrowing view of an analysis, ready for serialization.
pub fn analysis_record<'a>(bars: &'a [Bar], analysis: &Analysis) -> AnalysisRecord<'a> {
    AnalysisRecord {
        mitigation_mode: analysis.mitigation_mode,
        internal: scale_record(bars, &analysis.internal),
        swing: scale_record(bars, &analysis.swing),
    }
}

/// Pretty-printed JSON export of both scales.
pub fn render_json(bars: &[Bar], analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&analysis_record(bars, analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SwingError;
    use crate::engine::PassError;
    use crate::indicators::make_bars_hl;

    fn zone(direction: Direction, at: usize, mitigated: Option<usize>) -> OrderBlockZone {
        OrderBlockZone {
            direction,
            formation_index: at,
            top: 12.0,
            bottom: 10.0,
            volume: 1234.56,
            strength_percentage: 57.9,
            mitigation_index: mitigated,
        }
    }

    fn bars() -> Vec<Bar> {
        make_bars_hl(&[(12.0, 10.0), (11.0, 8.0), (13.0, 9.0)])
    }

    fn analysis(
        internal: Vec<OrderBlockZone>,
        swing: Result<Vec<OrderBlockZone>, PassError>,
    ) -> Analysis {
        Analysis {
            mitigation_mode: MitigationMode::Wick,
            internal: ScaleResult {
                scale: Scale::Internal,
                lookback: 5,
                outcome: Ok(internal),
            },
            swing: ScaleResult {
                scale: Scale::Swing,
                lookback: 20,
                outcome: swing,
            },
        }
    }

    #[test]
    fn renders_mitigated_zone() {
        let zones = [zone(Direction::Long, 0, Some(1))];
        let text = render_zones(&bars(), &zones, Scale::Internal);
        let expected = "Internal OB Long Zone:\n\
                        \x20 Start Time: 2024-01-02 00:00:00\n\
                        \x20 End Time:   2024-01-02 01:00:00\n\
                        \x20 Price Range: 10.0 to 12.0\n\
                        \x20 OB Volume:  1234.6\n\
                        \x20 Percentage: 57.0%\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn unmitigated_zone_ends_at_last_bar() {
        let text = render_zones(&bars(), &[zone(Direction::Short, 0, None)], Scale::Swing);
        assert!(text.starts_with("Swing OB Short Zone:\n"));
        assert!(text.contains("  End Time:   2024-01-02 02:00:00\n"));
    }

    #[test]
    fn skips_zones_with_missing_fields() {
        let mut broken = zone(Direction::Long, 1, None);
        broken.top = f64::NAN;
        let zones = [broken, zone(Direction::Long, 0, None)];
        let text = render_zones(&bars(), &zones, Scale::Internal);
        assert_eq!(text.matches("Zone:").count(), 1);
    }

    #[test]
    fn zones_listed_in_formation_order() {
        let zones = [zone(Direction::Short, 2, None), zone(Direction::Long, 0, None)];
        let text = render_zones(&bars(), &zones, Scale::Internal);
        let long_at = text.find("Long").unwrap();
        let short_at = text.find("Short").unwrap();
        assert!(long_at < short_at);
    }

    #[test]
    fn empty_report_has_both_headings() {
        let report = render_report(&[], &analysis(vec![], Ok(vec![])));
        assert_eq!(report, "Internal Order Blocks:\n\nSwing Order Blocks:\n\n");
    }

    #[test]
    fn failed_scale_renders_empty_body() {
        let failed = Err(PassError::Swing(SwingError::InvalidLookback(0)));
        let analysis = analysis(vec![zone(Direction::Long, 0, None)], failed);
        let report = render_report(&bars(), &analysis);
        assert!(report.starts_with("Internal Order Blocks:\nInternal OB Long Zone:\n"));
        assert!(report.ends_with("Swing Order Blocks:\n\n"));
    }

    #[test]
    fn json_export_carries_times_and_errors() {
        let failed = Err(PassError::Swing(SwingError::InvalidLookback(0)));
        let bars = bars();
        let analysis = analysis(vec![zone(Direction::Long, 0, Some(1))], failed);
        let json = render_json(&bars, &analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["mitigation_mode"], "wick");
        let z = &value["internal"][0];
        assert_eq!(z["direction"], "Long");
        assert_eq!(z["start_time"], "2024-01-02 00:00:00");
        assert_eq!(z["end_time"], "2024-01-02 01:00:00");
        assert_eq!(z["mitigation_index"], 1);
        assert_eq!(value["swing"]["error"], "swing lookback must be >= 1, got 0");
    }
}
