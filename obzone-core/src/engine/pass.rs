//! Scale passes: swing detection → identification → mitigation.
//!
//! A pass is a pure function of the bars, one lookback window and the
//! mitigation mode. The internal and swing passes share nothing but the
//! bar slice, so they run side by side and a failure in one leaves the
//! other untouched.

use crate::components::{HeuristicError, OrderBlockHeuristic, SwingDetector, SwingError};
use crate::config::{AnalysisConfig, Scale};
use crate::domain::{Bar, MitigationMode, OrderBlockZone};
use crate::indicators::{StructureBreakBlocks, SwingHighsLows};

use super::identifier::identify;
use super::mitigation::MitigationResolver;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PassError {
    #[error(transparent)]
    Swing(#[from] SwingError),

    #[error(transparent)]
    Heuristic(#[from] HeuristicError),
}

/// Outcome of one scale pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleResult {
    pub scale: Scale,
    pub lookback: usize,
    pub outcome: Result<Vec<OrderBlockZone>, PassError>,
}

impl ScaleResult {
    /// Finalized zones, or an empty slice when the pass failed.
    pub fn zones(&self) -> &[OrderBlockZone] {
        match &self.outcome {
            Ok(zones) => zones,
            Err(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&PassError> {
        self.outcome.as_ref().err()
    }
}

/// Both scale passes over one bar sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub mitigation_mode: MitigationMode,
    pub internal: ScaleResult,
    pub swing: ScaleResult,
}

impl Analysis {
    /// Results in report order: internal first, then swing.
    pub fn scales(&self) -> [&ScaleResult; 2] {
        [&self.internal, &self.swing]
    }
}

/// A swing detector and an order-block heuristic wired into scale passes.
pub struct Analyzer {
    detector: Box<dyn SwingDetector>,
    heuristic: Box<dyn OrderBlockHeuristic>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Box::new(SwingHighsLows), Box::new(StructureBreakBlocks))
    }
}

impl Analyzer {
    pub fn new(detector: Box<dyn SwingDetector>, heuristic: Box<dyn OrderBlockHeuristic>) -> Self {
        Self {
            detector,
            heuristic,
        }
    }

    /// Run one pass: label swings for `lookback`, identify zones, resolve mitigation.
    pub fn run_pass(
        &self,
        bars: &[Bar],
        lookback: usize,
        mode: MitigationMode,
    ) -> Result<Vec<OrderBlockZone>, PassError> {
        let swings = self.detector.detect(bars, lookback)?;
        let mut zones = identify(bars, &swings, self.heuristic.as_ref())?;
        MitigationResolver::new(mode).resolve(bars, &mut zones);
        Ok(zones)
    }

    fn run_scale(&self, bars: &[Bar], scale: Scale, config: &AnalysisConfig) -> ScaleResult {
        let lookback = config.lookback(scale);
        let outcome = self.run_pass(bars, lookback, config.mitigation_mode);
        match &outcome {
            Ok(zones) => log::info!("{scale} pass (lookback {lookback}): {} zones", zones.len()),
            Err(e) => log::warn!("{scale} pass (lookback {lookback}) failed: {e}"),
        }
        ScaleResult {
            scale,
            lookback,
            outcome,
        }
    }

    /// Run the internal and swing passes independently.
    pub fn analyze(&self, bars: &[Bar], config: &AnalysisConfig) -> Analysis {
        let (internal, swing) = rayon::join(
            || self.run_scale(bars, Scale::Internal, config),
            || self.run_scale(bars, Scale::Swing, config),
        );
        Analysis {
            mitigation_mode: config.mitigation_mode,
            internal,
            swing,
        }
    }
}

/// One pass with the default swing detector and heuristic.
pub fn run_pass(
    bars: &[Bar],
    lookback: usize,
    mode: MitigationMode,
) -> Result<Vec<OrderBlockZone>, PassError> {
    Analyzer::default().run_pass(bars, lookback, mode)
}
