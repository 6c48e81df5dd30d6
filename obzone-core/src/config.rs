//! Run configuration: mitigation mode and the lookback of each scale.
//!
//! Stored as TOML. Every key is optional; missing keys take the defaults
//! (wick mitigation, internal lookback 5, swing lookback 20).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::domain::MitigationMode;

pub const DEFAULT_INTERNAL_LOOKBACK: usize = 5;
pub const DEFAULT_SWING_LOOKBACK: usize = 20;

/// Structural resolution of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Internal,
    Swing,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::Internal, Scale::Swing];

    /// Prefix of each zone block in the text report.
    pub fn zone_prefix(&self) -> &'static str {
        match self {
            Scale::Internal => "Internal OB",
            Scale::Swing => "Swing OB",
        }
    }

    /// Section header in the text report.
    pub fn heading(&self) -> &'static str {
        match self {
            Scale::Internal => "Internal Order Blocks:",
            Scale::Swing => "Swing Order Blocks:",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Internal => write!(f, "internal"),
            Scale::Swing => write!(f, "swing"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{scale} lookback must be >= 1")]
    InvalidLookback { scale: Scale },
}

/// Parameters shared by both scale passes of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub mitigation_mode: MitigationMode,
    pub internal_lookback: usize,
    pub swing_lookback: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mitigation_mode: MitigationMode::Wick,
            internal_lookback: DEFAULT_INTERNAL_LOOKBACK,
            swing_lookback: DEFAULT_SWING_LOOKBACK,
        }
    }
}

impl AnalysisConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for scale in Scale::ALL {
            if self.lookback(scale) == 0 {
                return Err(ConfigError::InvalidLookback { scale });
            }
        }
        Ok(())
    }

    pub fn lookback(&self, scale: Scale) -> usize {
        match scale {
            Scale::Internal => self.internal_lookback,
            Scale::Swing => self.swing_lookback,
        }
    }
}
