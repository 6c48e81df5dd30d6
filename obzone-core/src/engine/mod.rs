//! Zone engine: turns a bar sequence into finalized order block zones.
//!
//! Each scale pass runs three stages:
//!
//! 1. Swing detection for the scale's lookback window
//! 2. Identification: heuristic formations packaged into zones with volume
//!    and strength attached
//! 3. Mitigation: first forward breach of each zone

pub mod identifier;
pub mod mitigation;
pub mod pass;
pub mod strength;

pub use identifier::{identify, zone_from_formation};
pub use mitigation::MitigationResolver;
pub use pass::{run_pass, Analysis, Analyzer, PassError, ScaleResult};
pub use strength::FormationVolume;
