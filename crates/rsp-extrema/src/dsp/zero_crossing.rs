//! Zero-crossing localization
//!
//! Finds sign transitions in the raw (already filtered) waveform, not in its
//! gradient. A crossing is only reported when one sample is strictly negative
//! and its neighbour strictly positive, so samples equal to zero never start
//! or end a crossing.

use ndarray::{ArrayBase, Data, Ix1};

use crate::error::ExtremaError;

/// Direction of a sign transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingDirection {
    /// Negative to positive
    Rising,
    /// Positive to negative
    Falling,
}

/// A single sign transition, located at the sample before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroCrossing {
    pub index: usize,
    pub direction: CrossingDirection,
}

/// All zero crossings of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingSequence {
    rising: Vec<usize>,
    falling: Vec<usize>,
    merged: Vec<ZeroCrossing>,
    start_direction: CrossingDirection,
}

impl CrossingSequence {
    /// Locate rising and falling crossings.
    ///
    /// Fails with [`ExtremaError::InsufficientCrossings`] when either
    /// direction has no crossing at all.
    pub fn locate<S>(signal: &ArrayBase<S, Ix1>) -> Result<Self, ExtremaError>
    where
        S: Data<Elem = f64>,
    {
        let mut rising = Vec::new();
        let mut falling = Vec::new();
        let mut merged = Vec::new();

        for (i, (&a, &b)) in signal.iter().zip(signal.iter().skip(1)).enumerate() {
            let direction = if a < 0.0 && b > 0.0 {
                rising.push(i);
                CrossingDirection::Rising
            } else if a > 0.0 && b < 0.0 {
                falling.push(i);
                CrossingDirection::Falling
            } else {
                continue;
            };
            merged.push(ZeroCrossing {
                index: i,
                direction,
            });
        }

        let (first_rise, first_fall) = match (rising.first(), falling.first()) {
            (Some(&r), Some(&f)) => (r, f),
            _ => {
                return Err(ExtremaError::InsufficientCrossings {
                    rising: rising.len(),
                    falling: falling.len(),
                })
            }
        };

        let start_direction = if first_rise < first_fall {
            CrossingDirection::Rising
        } else {
            CrossingDirection::Falling
        };

        log::trace!(
            "zero crossings: {} rising, {} falling, start {:?}",
            rising.len(),
            falling.len(),
            start_direction
        );

        Ok(Self {
            rising,
            falling,
            merged,
            start_direction,
        })
    }

    /// Rising crossing indices, ascending
    pub fn rising(&self) -> &[usize] {
        &self.rising
    }

    /// Falling crossing indices, ascending
    pub fn falling(&self) -> &[usize] {
        &self.falling
    }

    /// All crossings in ascending index order
    pub fn crossings(&self) -> &[ZeroCrossing] {
        &self.merged
    }

    /// All crossing indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.merged.iter().map(|c| c.index)
    }

    /// Direction of the earliest crossing
    pub fn start_direction(&self) -> CrossingDirection {
        self.start_direction
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rising_and_falling() {
        let signal = array![-1.0, 2.0, 3.0, -1.0, -2.0, 1.0];
        let seq = CrossingSequence::locate(&signal).unwrap();

        assert_eq!(seq.rising(), &[0, 4]);
        assert_eq!(seq.falling(), &[2]);
        assert_eq!(seq.indices().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(seq.start_direction(), CrossingDirection::Rising);
    }

    #[test]
    fn test_start_falling() {
        let signal = array![1.0, -1.0, 1.0];
        let seq = CrossingSequence::locate(&signal).unwrap();
        assert_eq!(seq.start_direction(), CrossingDirection::Falling);
        assert_eq!(
            seq.crossings(),
            &[
                ZeroCrossing {
                    index: 0,
                    direction: CrossingDirection::Falling,
                },
                ZeroCrossing {
                    index: 1,
                    direction: CrossingDirection::Rising,
                },
            ]
        );
    }

    #[test]
    fn test_exact_zero_is_ignored() {
        // -1 -> 0 -> 1 passes through zero but never straddles it
        let signal = array![-1.0, 0.0, 1.0, 0.0, -1.0];
        let result = CrossingSequence::locate(&signal);
        assert_eq!(
            result,
            Err(ExtremaError::InsufficientCrossings {
                rising: 0,
                falling: 0,
            })
        );
    }

    #[test]
    fn test_single_polarity_fails() {
        let signal = array![-1.0, 1.0, 2.0, 3.0];
        let result = CrossingSequence::locate(&signal);
        assert_eq!(
            result,
            Err(ExtremaError::InsufficientCrossings {
                rising: 1,
                falling: 0,
            })
        );
    }

    #[test]
    fn test_constant_signal_fails() {
        let signal = ndarray::Array1::from_elem(50, 0.7);
        assert!(matches!(
            CrossingSequence::locate(&signal),
            Err(ExtremaError::InsufficientCrossings { .. })
        ));
    }
}
