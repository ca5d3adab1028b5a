//! Batch detection over independent recordings
//!
//! Every recording gets its own `Result`; a failed recording never aborts
//! the batch. What to substitute for a failure is left to the caller.

use ndarray::Array1;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::rsp_extrema::{ExtremaDetector, RspExtrema};
use crate::error::ExtremaError;

/// Outcome of one recording in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Position of the recording in the input
    pub index: usize,
    pub result: Result<RspExtrema, ExtremaError>,
}

/// Summary counts over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub no_cycles: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            match &item.result {
                Ok(_) => acc.succeeded += 1,
                Err(e) if e.is_no_cycles() => acc.no_cycles += 1,
                Err(_) => acc.invalid += 1,
            }
            acc
        })
    }
}

/// Run the detector over each recording in order
pub fn detect_batch(detector: &ExtremaDetector, recordings: &[Array1<f64>]) -> Vec<BatchItem> {
    let items: Vec<BatchItem> = recordings
        .iter()
        .enumerate()
        .map(|(index, signal)| BatchItem {
            index,
            result: detector.detect(signal),
        })
        .collect();

    log_summary(&items);
    items
}

/// Process recordings in parallel (requires `parallel` feature)
///
/// Output order matches input order.
#[cfg(feature = "parallel")]
pub fn detect_batch_parallel(
    detector: &ExtremaDetector,
    recordings: &[Array1<f64>],
) -> Vec<BatchItem> {
    let items: Vec<BatchItem> = recordings
        .par_iter()
        .enumerate()
        .map(|(index, signal)| BatchItem {
            index,
            result: detector.detect(signal),
        })
        .collect();

    log_summary(&items);
    items
}

fn log_summary(items: &[BatchItem]) {
    let summary = BatchSummary::from_items(items);
    log::info!(
        "batch of {}: {} ok, {} without cycles, {} invalid",
        items.len(),
        summary.succeeded,
        summary.no_cycles,
        summary.invalid
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn recordings() -> Vec<Array1<f64>> {
        let wave: Array1<f64> = (0..3000)
            .map(|i| (2.0 * PI * i as f64 / 300.0 + 0.05).cos())
            .collect();
        vec![
            wave,
            Array1::from_elem(500, 1.0),
            Array1::from_vec(vec![0.5, -0.5]),
        ]
    }

    #[test]
    fn test_batch_keeps_going_after_failures() {
        let items = detect_batch(&ExtremaDetector::new(), &recordings());

        assert_eq!(items.len(), 3);
        assert!(items[0].result.is_ok());
        assert!(matches!(
            items[1].result,
            Err(ExtremaError::InsufficientCrossings { .. })
        ));
        assert!(matches!(
            items[2].result,
            Err(ExtremaError::SignalTooShort { .. })
        ));

        let summary = BatchSummary::from_items(&items);
        assert_eq!(
            summary,
            BatchSummary {
                succeeded: 1,
                no_cycles: 1,
                invalid: 1,
            }
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let detector = ExtremaDetector::new();
        let data = recordings();
        assert_eq!(
            detect_batch(&detector, &data),
            detect_batch_parallel(&detector, &data)
        );
    }
}
