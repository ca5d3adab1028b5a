//! DSP (Digital Signal Processing) module
//!
//! Sample-level passes over a filtered respiration waveform.
//!
//! - `CrossingSequence` - Zero-crossing localization
//! - `search_extrema` - One extremum per inter-crossing interval

mod extrema_search;
mod zero_crossing;

pub use extrema_search::{search_extrema, SearchTarget};
pub use zero_crossing::{CrossingDirection, CrossingSequence, ZeroCrossing};
