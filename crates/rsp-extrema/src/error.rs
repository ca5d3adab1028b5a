//! Error types for respiratory extrema detection.

use std::fmt;
use thiserror::Error;

/// Pipeline stage at which a detection gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStage {
    /// Small-amplitude outlier removal
    OutlierRejection,
    /// Peak/trough alternation enforcement
    Alternation,
    /// Leading peak / trailing trough removal
    BoundaryTrim,
}

impl fmt::Display for DetectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OutlierRejection => "outlier rejection",
            Self::Alternation => "alternation enforcement",
            Self::BoundaryTrim => "boundary trim",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtremaError {
    #[error("signal too short: {len} samples (need at least {min})")]
    SignalTooShort { len: usize, min: usize },

    #[error("non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    #[error("invalid outlier threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f64),

    #[error("insufficient zero crossings: {rising} rising, {falling} falling")]
    InsufficientCrossings { rising: usize, falling: usize },

    #[error("degenerate extrema after {stage}: {remaining} remaining (need at least 2)")]
    DegenerateExtrema {
        stage: DetectionStage,
        remaining: usize,
    },
}

impl ExtremaError {
    /// True when the signal simply holds no usable breathing cycles, as
    /// opposed to malformed input or parameters.
    pub fn is_no_cycles(&self) -> bool {
        matches!(
            self,
            Self::InsufficientCrossings { .. } | Self::DegenerateExtrema { .. }
        )
    }
}
