use proptest::prelude::*;

// Property-based checks for the extrema detector invariants

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{search_extrema, CrossingSequence};
    use crate::physio::{reject_outliers, ExtremaDetector};
    use crate::{detect_extrema, ExtremaError};
    use ndarray::Array1;
    use std::f64::consts::PI;

    fn cosine(period: usize, cycles: usize, phase: f64, amplitude: f64) -> Array1<f64> {
        (0..period * cycles)
            .map(|i| amplitude * (2.0 * PI * i as f64 / period as f64 + phase).cos())
            .collect()
    }

    // =========================================================================
    // Test 1: Alternation on clean breathing waveforms
    // =========================================================================
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_alternation_invariant(
            period in 40usize..400usize,
            cycles in 4usize..20usize,
            phase in 0.0f64..6.28f64,
            amplitude in 0.1f64..10.0f64,
        ) {
            let signal = cosine(period, cycles, phase, amplitude);
            let result = ExtremaDetector::new().detect(&signal).unwrap();

            prop_assert!(!result.is_empty());
            for (i, (t, p)) in result.cycles().enumerate() {
                prop_assert!(t < p);
                prop_assert!(signal[t] < signal[p], "trough {} not below peak {}", t, p);
                if let Some(&next) = result.troughs.get(i + 1) {
                    prop_assert!(p < next);
                }
            }
        }
    }

    // =========================================================================
    // Test 2: Counts and ordering on arbitrary input
    // =========================================================================
    proptest! {
        #[test]
        fn test_count_invariant(
            samples in prop::collection::vec(-1.0f64..1.0f64, 3..300),
            threshold in 0.0f64..1.0f64,
        ) {
            let signal = Array1::from_vec(samples);

            match detect_extrema(&signal, 100, threshold) {
                Ok(result) => {
                    prop_assert_eq!(result.peaks.len(), result.troughs.len());
                    prop_assert!(result.peaks.windows(2).all(|w| w[0] < w[1]));
                    prop_assert!(result.troughs.windows(2).all(|w| w[0] < w[1]));
                    for (t, p) in result.cycles() {
                        prop_assert!(t < p && p < signal.len());
                    }
                }
                Err(e) => {
                    prop_assert!(e.is_no_cycles(), "unexpected error {:?}", e);
                }
            }
        }

        #[test]
        fn test_idempotence(
            samples in prop::collection::vec(-5.0f64..5.0f64, 3..200),
        ) {
            let signal = Array1::from_vec(samples);
            let detector = ExtremaDetector::new();
            prop_assert_eq!(detector.detect(&signal), detector.detect(&signal));
        }
    }

    // =========================================================================
    // Test 3: Raising the threshold only removes extrema
    // =========================================================================
    proptest! {
        #[test]
        fn test_threshold_monotonicity(
            samples in prop::collection::vec(-1.0f64..1.0f64, 10..300),
            low in 0.0f64..1.0f64,
            delta in 0.0f64..1.0f64,
        ) {
            let signal = Array1::from_vec(samples);
            let crossings = match CrossingSequence::locate(&signal) {
                Ok(c) => c,
                Err(_) => return Ok(()),
            };
            let extrema = search_extrema(&signal, &crossings);
            prop_assume!(extrema.len() >= 2);

            let loose = reject_outliers(&signal, &extrema, low).unwrap();
            let strict = reject_outliers(&signal, &extrema, low + delta).unwrap();

            prop_assert!(strict.len() <= loose.len());
            prop_assert!(strict.iter().all(|e| loose.contains(e)));
        }
    }

    // =========================================================================
    // Test 4: Signals without both crossing directions never panic
    // =========================================================================
    proptest! {
        #[test]
        fn test_single_sign_signal(
            samples in prop::collection::vec(0.0f64..10.0f64, 3..100),
        ) {
            let signal = Array1::from_vec(samples);
            let result = ExtremaDetector::new().detect(&signal);
            let is_insufficient = matches!(result, Err(ExtremaError::InsufficientCrossings { .. }));
            prop_assert!(is_insufficient);
        }
    }
}
