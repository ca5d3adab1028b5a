//! Extremum search between consecutive zero crossings
//!
//! Maxima are searched between a rising and the following falling crossing,
//! minima between a falling and the following rising crossing. The target
//! alternates per interval starting from the direction of the first crossing.

use ndarray::{s, ArrayBase, Data, Ix1};

use super::zero_crossing::{CrossingDirection, CrossingSequence};

/// What to look for inside one inter-crossing interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Max,
    Min,
}

impl SearchTarget {
    /// Target for the interval at `position` (0-based) given the direction
    /// of the first crossing.
    pub fn for_interval(start: CrossingDirection, position: usize) -> Self {
        let first = match start {
            CrossingDirection::Rising => Self::Max,
            CrossingDirection::Falling => Self::Min,
        };
        if position % 2 == 0 {
            first
        } else {
            first.opposite()
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }

    /// Offset of the first extreme value in `values`
    fn locate<'a, I>(self, values: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in values.into_iter().enumerate() {
            let better = match best {
                None => true,
                Some((_, b)) => match self {
                    Self::Max => v > b,
                    Self::Min => v < b,
                },
            };
            if better {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Find one extremum per pair of consecutive crossings.
///
/// Each interval spans `[crossing[i], crossing[i + 1])`. Returned indices are
/// absolute positions in `signal`, strictly increasing, and there are exactly
/// `crossings.len() - 1` of them.
pub fn search_extrema<S>(signal: &ArrayBase<S, Ix1>, crossings: &CrossingSequence) -> Vec<usize>
where
    S: Data<Elem = f64>,
{
    let bounds: Vec<usize> = crossings.indices().collect();
    let start = crossings.start_direction();

    let mut extrema = Vec::with_capacity(bounds.len().saturating_sub(1));
    for (position, edge) in bounds.windows(2).enumerate() {
        let (beg, end) = (edge[0], edge[1]);
        let target = SearchTarget::for_interval(start, position);

        // Intervals are never empty: crossing indices are strictly increasing.
        if let Some(offset) = target.locate(signal.slice(s![beg..end]).iter()) {
            log::trace!("interval {}..{} {:?} at {}", beg, end, target, beg + offset);
            extrema.push(beg + offset);
        }
    }

    extrema
}
