//! Respiratory Extrema Detection
//!
//! Locates end-inspiration peaks and end-expiration troughs in a filtered,
//! de-trended respiration waveform oscillating around zero.
//!
//! # Algorithm
//!
//! ```text
//! Filtered RSP
//!     │
//!     ├──► A: zero crossings (strict sign change, zeros ignored)
//!     │
//!     ├──► B: max between rise→fall, min between fall→rise
//!     │
//!     ├──► C: drop extrema whose gap to the next one is small
//!     │       relative to the mean gap (outlier_threshold)
//!     │
//!     └──► D: drop extrema breaking peak/trough alternation,
//!             then force trough-first / peak-last
//!
//!     Labels: troughs = even positions, peaks = odd positions
//! ```
//!
//! # Reference
//!
//! - Noto et al., "Automated analysis of breathing waveforms using
//!   BreathMetrics" (2018), bioRxiv 270348

use ndarray::{Array1, ArrayBase, Data, Ix1};
use serde::{Deserialize, Serialize};

use crate::config::ExtremaConfig;
use crate::dsp::{search_extrema, CrossingSequence};
use crate::error::{DetectionStage, ExtremaError};

/// Shortest signal that can hold a rising and a falling crossing
pub const MIN_SIGNAL_LEN: usize = 3;

/// Detected breathing extrema.
///
/// `troughs[i] < peaks[i] < troughs[i + 1]` and both sequences have the same
/// length: every peak is paired with the trough preceding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RspExtrema {
    /// End-inspiration sample indices
    pub peaks: Vec<usize>,
    /// End-expiration sample indices
    pub troughs: Vec<usize>,
    /// Sampling rate of the analysed signal (reported only)
    pub sampling_rate: u32,
}

/// Per-sample 0/1 markers of detected extrema
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremaMarkers {
    pub peaks: Array1<u8>,
    pub troughs: Array1<u8>,
}

impl RspExtrema {
    /// Number of complete trough→peak cycles
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// (trough, peak) pairs, i.e. one inhalation each
    pub fn cycles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.troughs.iter().copied().zip(self.peaks.iter().copied())
    }

    /// Peak positions in seconds, `None` when the sampling rate is 0
    pub fn peak_times(&self) -> Option<Vec<f64>> {
        self.to_seconds(&self.peaks)
    }

    /// Trough positions in seconds, `None` when the sampling rate is 0
    pub fn trough_times(&self) -> Option<Vec<f64>> {
        self.to_seconds(&self.troughs)
    }

    fn to_seconds(&self, indices: &[usize]) -> Option<Vec<f64>> {
        if self.sampling_rate == 0 {
            return None;
        }
        let fs = self.sampling_rate as f64;
        Some(indices.iter().map(|&i| i as f64 / fs).collect())
    }

    /// Expand to marker arrays of length `signal_len`.
    ///
    /// Indices at or beyond `signal_len` are ignored.
    pub fn markers(&self, signal_len: usize) -> ExtremaMarkers {
        let mut peaks = Array1::zeros(signal_len);
        let mut troughs = Array1::zeros(signal_len);
        for &i in self.peaks.iter().filter(|&&i| i < signal_len) {
            peaks[i] = 1;
        }
        for &i in self.troughs.iter().filter(|&&i| i < signal_len) {
            troughs[i] = 1;
        }
        ExtremaMarkers { peaks, troughs }
    }
}

/// Respiratory extrema detector
#[derive(Debug, Clone, Default)]
pub struct ExtremaDetector {
    cfg: ExtremaConfig,
}

impl ExtremaDetector {
    pub fn new() -> Self {
        Self::with_config(ExtremaConfig::default())
    }

    pub fn with_config(cfg: ExtremaConfig) -> Self {
        Self { cfg }
    }

    /// Get configuration
    pub fn config(&self) -> &ExtremaConfig {
        &self.cfg
    }

    /// Detect peaks and troughs in a filtered respiration signal
    pub fn detect<S>(&self, signal: &ArrayBase<S, Ix1>) -> Result<RspExtrema, ExtremaError>
    where
        S: Data<Elem = f64>,
    {
        validate_input(signal, self.cfg.outlier_threshold)?;

        let crossings = CrossingSequence::locate(signal)?;
        let extrema = search_extrema(signal, &crossings);
        let extrema = reject_outliers(signal, &extrema, self.cfg.outlier_threshold)?;
        let extrema = enforce_alternation(signal, &extrema)?;
        let (peaks, troughs) = label_extrema(&extrema);

        log::debug!(
            "rsp extrema: {} crossings, {} peaks, {} troughs",
            crossings.len(),
            peaks.len(),
            troughs.len()
        );

        Ok(RspExtrema {
            peaks,
            troughs,
            sampling_rate: self.cfg.sampling_rate,
        })
    }

    /// Slice convenience wrapper around [`ExtremaDetector::detect`]
    pub fn detect_slice(&self, signal: &[f64]) -> Result<RspExtrema, ExtremaError> {
        self.detect(&ndarray::ArrayView1::from(signal))
    }
}

/// Detect peaks and troughs with explicit parameters.
///
/// `sampling_rate` is carried into the result and not used by detection.
pub fn detect_extrema<S>(
    signal: &ArrayBase<S, Ix1>,
    sampling_rate: u32,
    outlier_threshold: f64,
) -> Result<RspExtrema, ExtremaError>
where
    S: Data<Elem = f64>,
{
    ExtremaDetector::with_config(ExtremaConfig::new(sampling_rate, outlier_threshold))
        .detect(signal)
}

fn validate_input<S>(signal: &ArrayBase<S, Ix1>, outlier_threshold: f64) -> Result<(), ExtremaError>
where
    S: Data<Elem = f64>,
{
    if signal.len() < MIN_SIGNAL_LEN {
        return Err(ExtremaError::SignalTooShort {
            len: signal.len(),
            min: MIN_SIGNAL_LEN,
        });
    }
    if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
        return Err(ExtremaError::NonFiniteSample { index });
    }
    if !outlier_threshold.is_finite() || outlier_threshold < 0.0 {
        return Err(ExtremaError::InvalidThreshold(outlier_threshold));
    }
    Ok(())
}

/// Drop extrema produced by small oscillations.
///
/// With `gap[k] = |x[e[k+1]] - x[e[k]]|`, keeps `e[k]` for every `k` where
/// `gap[k] > mean(gap) * threshold`. The last extremum has no following gap
/// and is therefore always dropped.
pub(crate) fn reject_outliers<S>(
    signal: &ArrayBase<S, Ix1>,
    extrema: &[usize],
    threshold: f64,
) -> Result<Vec<usize>, ExtremaError>
where
    S: Data<Elem = f64>,
{
    if extrema.len() < 2 {
        log::warn!("outlier rejection needs 2 extrema, got {}", extrema.len());
        return Err(ExtremaError::DegenerateExtrema {
            stage: DetectionStage::OutlierRejection,
            remaining: extrema.len(),
        });
    }

    let gaps: Vec<f64> = extrema
        .windows(2)
        .map(|w| (signal[w[1]] - signal[w[0]]).abs())
        .collect();
    let mean_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let cutoff = mean_gap * threshold;

    let kept: Vec<usize> = gaps
        .iter()
        .zip(extrema)
        .filter(|&(&gap, _)| gap > cutoff)
        .map(|(_, &e)| e)
        .collect();

    log::debug!(
        "outlier rejection: {} -> {} extrema (cutoff {:.4})",
        extrema.len(),
        kept.len(),
        cutoff
    );

    Ok(kept)
}

/// Restore strict peak/trough alternation and trim the boundaries so the
/// sequence starts with a trough and ends with a peak.
pub(crate) fn enforce_alternation<S>(
    signal: &ArrayBase<S, Ix1>,
    extrema: &[usize],
) -> Result<Vec<usize>, ExtremaError>
where
    S: Data<Elem = f64>,
{
    if extrema.len() < 2 {
        log::warn!("alternation check needs 2 extrema, got {}", extrema.len());
        return Err(ExtremaError::DegenerateExtrema {
            stage: DetectionStage::Alternation,
            remaining: extrema.len(),
        });
    }

    let amps: Vec<f64> = extrema.iter().map(|&i| signal[i]).collect();
    let steps: Vec<i8> = amps.windows(2).map(|w| sign(w[1] - w[0])).collect();

    // Two equal consecutive steps mean two peaks (or two troughs) in a row;
    // the second one of the pair goes.
    let mut broken = vec![false; extrema.len()];
    for (j, pair) in steps.windows(2).enumerate() {
        if pair[0] + pair[1] != 0 {
            broken[j + 1] = true;
        }
    }

    let (kept, amps): (Vec<usize>, Vec<f64>) = extrema
        .iter()
        .copied()
        .zip(amps)
        .zip(&broken)
        .filter(|&(_, &is_broken)| !is_broken)
        .map(|(pair, _)| pair)
        .unzip();

    // Only interior positions can be marked, so both ends always survive.
    let n = kept.len();
    debug_assert!(n >= 2);

    // Both checks read the amplitudes before either end is dropped.
    let begin = usize::from(amps[0] > amps[1]);
    let end = if amps[n - 1] < amps[n - 2] { n - 1 } else { n };
    let trimmed = if begin < end {
        kept[begin..end].to_vec()
    } else {
        Vec::new()
    };

    log::debug!(
        "alternation: {} -> {} -> {} extrema",
        extrema.len(),
        n,
        trimmed.len()
    );

    if trimmed.len() < 2 {
        log::warn!("boundary trim left {} extrema", trimmed.len());
        return Err(ExtremaError::DegenerateExtrema {
            stage: DetectionStage::BoundaryTrim,
            remaining: trimmed.len(),
        });
    }

    Ok(trimmed)
}

/// Split a trough-first sequence into (peaks, troughs).
///
/// Troughs take the even positions except the final one, peaks the odd
/// positions, so the two always have the same length.
fn label_extrema(extrema: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let peaks = extrema.iter().skip(1).step_by(2).copied().collect();
    let troughs = extrema[..extrema.len().saturating_sub(1)]
        .iter()
        .step_by(2)
        .copied()
        .collect();
    (peaks, troughs)
}

/// Sign with sign(0) = 0
fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}
